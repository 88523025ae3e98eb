//! GraphQL document parsing into executable selections

use crate::core::arguments::Arguments;
use crate::core::definition::RootType;
use crate::core::error::ExecutionError;
use graphql_parser::query::{
    Definition, Directive, FragmentDefinition, OperationDefinition, Selection, SelectionSet,
    Value as GqlValue, VariableDefinition, parse_query,
};
use serde_json::{Map, Value, json};
use std::collections::HashMap;

use super::selection::FieldSelection;

/// The operation picked out of a document, ready to execute
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOperation {
    pub operation: RootType,
    pub name: Option<String>,
    pub selections: Vec<FieldSelection>,
}

/// Parse `query` and lower the chosen operation into field selections
///
/// Without `operation_name` the first operation of the document is used.
/// Variables, fragments, aliases and `@skip` / `@include` are resolved here,
/// so the executor only ever sees plain [`FieldSelection`] trees.
pub fn parse_operation(
    query: &str,
    operation_name: Option<&str>,
    variables: &HashMap<String, Value>,
) -> Result<ParsedOperation, ExecutionError> {
    let doc = parse_query::<String>(query).map_err(|e| ExecutionError::Parse {
        message: e.to_string(),
    })?;

    let mut fragments = HashMap::new();
    let mut operations = Vec::new();
    for definition in &doc.definitions {
        match definition {
            Definition::Fragment(fragment) => {
                fragments.insert(fragment.name.as_str(), fragment);
            }
            Definition::Operation(operation) => operations.push(operation),
        }
    }

    let operation = match operation_name {
        Some(wanted) => operations
            .into_iter()
            .find(|operation| name_of(operation) == Some(wanted))
            .ok_or_else(|| ExecutionError::UnknownOperation {
                name: wanted.to_string(),
            })?,
        None => operations
            .into_iter()
            .next()
            .ok_or(ExecutionError::NoOperation)?,
    };

    let (root, variable_definitions, selection_set) = match operation {
        OperationDefinition::SelectionSet(set) => (RootType::Query, &[][..], set),
        OperationDefinition::Query(query) => (
            RootType::Query,
            query.variable_definitions.as_slice(),
            &query.selection_set,
        ),
        OperationDefinition::Mutation(mutation) => (
            RootType::Mutation,
            mutation.variable_definitions.as_slice(),
            &mutation.selection_set,
        ),
        OperationDefinition::Subscription(_) => {
            return Err(ExecutionError::UnsupportedOperation {
                operation: "Subscription".to_string(),
            });
        }
    };

    let lowering = Lowering {
        fragments,
        variables: bind_variables(variable_definitions, variables)?,
    };
    let selections = lowering.lower_selection_set(selection_set, &mut Vec::new())?;

    Ok(ParsedOperation {
        operation: root,
        name: name_of(operation).map(str::to_string),
        selections,
    })
}

fn name_of<'d>(operation: &'d OperationDefinition<'_, String>) -> Option<&'d str> {
    match operation {
        OperationDefinition::SelectionSet(_) => None,
        OperationDefinition::Query(query) => query.name.as_deref(),
        OperationDefinition::Mutation(mutation) => mutation.name.as_deref(),
        OperationDefinition::Subscription(subscription) => subscription.name.as_deref(),
    }
}

/// Declared variables take the supplied value, else their default, else null
fn bind_variables(
    definitions: &[VariableDefinition<'_, String>],
    supplied: &HashMap<String, Value>,
) -> Result<HashMap<String, Value>, ExecutionError> {
    let no_variables = HashMap::new();
    let mut bound = HashMap::new();
    for definition in definitions {
        let value = match supplied.get(&definition.name) {
            Some(value) => value.clone(),
            None => match &definition.default_value {
                Some(default) => gql_value_to_json(default, &no_variables)?,
                None => Value::Null,
            },
        };
        bound.insert(definition.name.clone(), value);
    }
    Ok(bound)
}

struct Lowering<'d, 'a> {
    fragments: HashMap<&'d str, &'d FragmentDefinition<'a, String>>,
    variables: HashMap<String, Value>,
}

impl<'d, 'a> Lowering<'d, 'a> {
    fn lower_selection_set(
        &self,
        set: &SelectionSet<'a, String>,
        expanding: &mut Vec<String>,
    ) -> Result<Vec<FieldSelection>, ExecutionError> {
        let mut lowered = Vec::new();

        for selection in &set.items {
            match selection {
                Selection::Field(field) => {
                    if !self.is_included(&field.directives)? {
                        continue;
                    }
                    let mut arguments = Arguments::new();
                    for (name, value) in &field.arguments {
                        arguments.insert(name.clone(), gql_value_to_json(value, &self.variables)?);
                    }
                    merge_selection(
                        &mut lowered,
                        FieldSelection {
                            name: field.name.clone(),
                            alias: field.alias.clone(),
                            arguments,
                            selection: self.lower_selection_set(&field.selection_set, expanding)?,
                        },
                    )?;
                }
                Selection::InlineFragment(fragment) => {
                    if !self.is_included(&fragment.directives)? {
                        continue;
                    }
                    for child in self.lower_selection_set(&fragment.selection_set, expanding)? {
                        merge_selection(&mut lowered, child)?;
                    }
                }
                Selection::FragmentSpread(spread) => {
                    if !self.is_included(&spread.directives)? {
                        continue;
                    }
                    let name = spread.fragment_name.as_str();
                    let fragment = self.fragments.get(name).ok_or_else(|| {
                        ExecutionError::UnknownFragment {
                            name: name.to_string(),
                        }
                    })?;
                    if expanding.iter().any(|active| active == name) {
                        return Err(ExecutionError::Parse {
                            message: format!("Fragment '{}' spreads itself", name),
                        });
                    }

                    expanding.push(name.to_string());
                    let children = self.lower_selection_set(&fragment.selection_set, expanding)?;
                    expanding.pop();

                    for child in children {
                        merge_selection(&mut lowered, child)?;
                    }
                }
            }
        }

        Ok(lowered)
    }

    /// Evaluate `@skip(if:)` and `@include(if:)`
    fn is_included(&self, directives: &[Directive<'a, String>]) -> Result<bool, ExecutionError> {
        for directive in directives {
            let condition = directive
                .arguments
                .iter()
                .find(|(name, _)| name == "if")
                .map(|(_, value)| gql_value_to_json(value, &self.variables))
                .transpose()?
                .and_then(|value| value.as_bool());

            match (directive.name.as_str(), condition) {
                ("skip", Some(true)) | ("include", Some(false)) => return Ok(false),
                _ => {}
            }
        }
        Ok(true)
    }
}

/// Fields selected twice under one response key merge their sub-selections
///
/// Both occurrences must name the same field with the same arguments.
fn merge_selection(
    target: &mut Vec<FieldSelection>,
    selection: FieldSelection,
) -> Result<(), ExecutionError> {
    match target
        .iter_mut()
        .find(|existing| existing.response_key() == selection.response_key())
    {
        Some(existing) => {
            if existing.name != selection.name {
                return Err(ExecutionError::FieldConflict {
                    response_key: selection.response_key().to_string(),
                    message: format!(
                        "'{}' and '{}' are different fields",
                        existing.name, selection.name
                    ),
                });
            }
            if existing.arguments != selection.arguments {
                return Err(ExecutionError::FieldConflict {
                    response_key: selection.response_key().to_string(),
                    message: format!("'{}' is selected with different arguments", selection.name),
                });
            }
            for child in selection.selection {
                merge_selection(&mut existing.selection, child)?;
            }
        }
        None => target.push(selection),
    }
    Ok(())
}

/// Convert a GraphQL literal to JSON, substituting variables
pub fn gql_value_to_json(
    value: &GqlValue<'_, String>,
    variables: &HashMap<String, Value>,
) -> Result<Value, ExecutionError> {
    Ok(match value {
        GqlValue::Variable(name) => {
            variables
                .get(name)
                .cloned()
                .ok_or_else(|| ExecutionError::UndefinedVariable { name: name.clone() })?
        }
        GqlValue::Null => Value::Null,
        GqlValue::Int(i) => json!(i.as_i64().unwrap_or(0)),
        GqlValue::Float(f) => json!(f),
        GqlValue::String(s) => json!(s),
        GqlValue::Boolean(b) => json!(b),
        GqlValue::Enum(e) => json!(e),
        GqlValue::List(list) => Value::Array(
            list.iter()
                .map(|item| gql_value_to_json(item, variables))
                .collect::<Result<_, _>>()?,
        ),
        GqlValue::Object(obj) => {
            let mut map = Map::new();
            for (k, v) in obj {
                map.insert(k.clone(), gql_value_to_json(v, variables)?);
            }
            Value::Object(map)
        }
    })
}
