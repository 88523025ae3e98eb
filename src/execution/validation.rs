//! Selection validation against the compiled schema
//!
//! Runs over the whole requested tree before any resolver is invoked, so a
//! rejected operation has no side effects.

use crate::core::error::ExecutionError;
use crate::schema::CompiledSchema;

use super::selection::FieldSelection;

pub fn validate_selections(
    schema: &CompiledSchema,
    type_name: &str,
    selections: &[FieldSelection],
) -> Result<(), ExecutionError> {
    for selection in selections {
        validate_field(schema, type_name, selection)?;
    }
    Ok(())
}

fn validate_field(
    schema: &CompiledSchema,
    type_name: &str,
    selection: &FieldSelection,
) -> Result<(), ExecutionError> {
    let field = schema
        .field(type_name, &selection.name)
        .ok_or_else(|| ExecutionError::UnknownField {
            type_name: type_name.to_string(),
            field: selection.name.clone(),
        })?;

    if let Some(argument) = selection
        .arguments
        .names()
        .find(|name| field.argument(name).is_none())
    {
        return Err(ExecutionError::UnknownArgument {
            type_name: type_name.to_string(),
            field: field.name.clone(),
            argument: argument.to_string(),
        });
    }

    if let Some(argument) = field
        .arguments
        .iter()
        .find(|argument| argument.ty.non_null && !selection.arguments.is_provided(&argument.name))
    {
        return Err(ExecutionError::MissingArgument {
            type_name: type_name.to_string(),
            field: field.name.clone(),
            argument: argument.name.clone(),
            expected: argument.ty.to_string(),
        });
    }

    for argument in &field.arguments {
        let Some(value) = selection.arguments.get(&argument.name) else {
            continue;
        };
        if !argument.ty.accepts_input(value) {
            return Err(ExecutionError::InvalidArgument {
                type_name: type_name.to_string(),
                field: field.name.clone(),
                argument: argument.name.clone(),
                expected: argument.ty.to_string(),
                found: value.to_string(),
            });
        }
    }

    let invalid = |message: &str| ExecutionError::InvalidSelection {
        type_name: type_name.to_string(),
        field: field.name.clone(),
        message: message.to_string(),
    };

    if field.ty.is_builtin_scalar() {
        if !selection.selection.is_empty() {
            return Err(invalid("scalar fields have no sub-fields"));
        }
        return Ok(());
    }

    if selection.selection.is_empty() {
        return Err(invalid(&format!(
            "type '{}' must have a selection of sub-fields",
            field.ty
        )));
    }
    validate_selections(schema, &field.ty.name, &selection.selection)
}
