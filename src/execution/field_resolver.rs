//! Field resolution with null propagation
//!
//! A field resolves in three steps: invoke its resolver (or read the parent's
//! property), complete the value against the declared type (lists element by
//! element, objects by recursing into the sub-selection, scalars by
//! coercion), then enforce nullability. A null at a non-null position turns
//! into [`NullPropagation`], which the nearest nullable ancestor absorbs by
//! becoming null itself.

use crate::core::context::RequestContext;
use crate::core::error::{FieldError, PathSegment};
use crate::core::type_ref::{TypeRef, is_builtin_scalar, scalar_accepts};
use crate::schema::CompiledSchema;
use futures::future::{BoxFuture, FutureExt};
use serde_json::{Map, Value};

use super::selection::FieldSelection;

/// A null reached a non-null position
///
/// The error has already been recorded; the caller only needs to null out
/// the nearest nullable position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NullPropagation;

type Completion = Result<Value, NullPropagation>;

pub(crate) struct FieldResolver<'a> {
    schema: &'a CompiledSchema,
    ctx: &'a RequestContext,
}

impl<'a> FieldResolver<'a> {
    pub fn new(schema: &'a CompiledSchema, ctx: &'a RequestContext) -> Self {
        Self { schema, ctx }
    }

    /// Resolve one selected field of `type_name` against `parent`
    pub fn resolve_field<'b>(
        &'b self,
        type_name: &'b str,
        parent: Option<&'b Value>,
        selection: &'b FieldSelection,
        path: Vec<PathSegment>,
        errors: &'b mut Vec<FieldError>,
    ) -> BoxFuture<'b, Completion> {
        async move {
            self.resolve_field_impl(type_name, parent, selection, path, errors)
                .await
        }
        .boxed()
    }

    async fn resolve_field_impl(
        &self,
        type_name: &str,
        parent: Option<&Value>,
        selection: &FieldSelection,
        path: Vec<PathSegment>,
        errors: &mut Vec<FieldError>,
    ) -> Completion {
        let label = format!("{}.{}", type_name, selection.name);
        let Some(field) = self.schema.field(type_name, &selection.name) else {
            errors.push(FieldError::resolver(
                path,
                format!("Cannot query field '{}' on type '{}'", selection.name, type_name),
            ));
            return Ok(Value::Null);
        };

        let resolved = match self.schema.resolver(type_name, &field.name) {
            Some(resolver) => {
                tracing::debug!(
                    operation_id = self.ctx.operation_id(),
                    field = %label,
                    "invoking resolver"
                );
                resolver
                    .resolve(parent, &selection.arguments, self.ctx)
                    .await
            }
            None => Ok(property_access(parent, &field.name)),
        };

        let completed = match resolved {
            Ok(value) => {
                self.complete_value(&field.ty, value, &selection.selection, &path, &label, errors)
                    .await
            }
            Err(err) => {
                tracing::warn!(
                    operation_id = self.ctx.operation_id(),
                    field = %label,
                    error = %err,
                    "resolver failed"
                );
                errors.push(FieldError::resolver(path.clone(), format!("{:#}", err)));
                Err(NullPropagation)
            }
        };

        enforce_nullability(field.ty.non_null, completed, path, &label, errors)
    }

    /// Complete a resolved value against its type, except for the outer non-null wrapper
    async fn complete_value(
        &self,
        ty: &TypeRef,
        value: Value,
        selection: &[FieldSelection],
        path: &[PathSegment],
        label: &str,
        errors: &mut Vec<FieldError>,
    ) -> Completion {
        if !ty.list || value.is_null() {
            return self
                .complete_named(&ty.name, value, selection, path, label, errors)
                .await;
        }

        let items = match value {
            Value::Array(items) => items,
            other => {
                errors.push(FieldError::resolver(
                    path.to_vec(),
                    format!("Expected a list for field {}, got {}", label, kind_of(&other)),
                ));
                return Err(NullPropagation);
            }
        };

        let mut completed = Vec::with_capacity(items.len());
        let mut propagated = false;
        for (index, item) in items.into_iter().enumerate() {
            let mut item_path = path.to_vec();
            item_path.push(PathSegment::Index(index));

            let item = self
                .complete_named(&ty.name, item, selection, &item_path, label, errors)
                .await;
            match enforce_nullability(ty.list_element_non_null, item, item_path, label, errors) {
                Ok(value) => completed.push(value),
                Err(NullPropagation) => propagated = true,
            }
        }

        if propagated {
            Err(NullPropagation)
        } else {
            Ok(Value::Array(completed))
        }
    }

    /// Complete a single value of a named type
    async fn complete_named(
        &self,
        type_name: &str,
        value: Value,
        selection: &[FieldSelection],
        path: &[PathSegment],
        label: &str,
        errors: &mut Vec<FieldError>,
    ) -> Completion {
        if value.is_null() {
            return Ok(Value::Null);
        }

        if is_builtin_scalar(type_name) {
            return coerce_scalar(type_name, value).map_err(|message| {
                errors.push(FieldError::resolver(path.to_vec(), message));
                NullPropagation
            });
        }

        if !value.is_object() {
            errors.push(FieldError::resolver(
                path.to_vec(),
                format!(
                    "Expected an object of type {} for field {}, got {}",
                    type_name,
                    label,
                    kind_of(&value)
                ),
            ));
            return Err(NullPropagation);
        }

        let mut object = Map::new();
        let mut propagated = false;
        for child in selection {
            let key = child.response_key().to_string();
            let mut child_path = path.to_vec();
            child_path.push(PathSegment::Field(key.clone()));

            match self
                .resolve_field(type_name, Some(&value), child, child_path, errors)
                .await
            {
                Ok(resolved) => {
                    object.insert(key, resolved);
                }
                Err(NullPropagation) => propagated = true,
            }
        }

        if propagated {
            Err(NullPropagation)
        } else {
            Ok(Value::Object(object))
        }
    }
}

/// Turn a null at a non-null position into propagation, and absorb
/// propagation at a nullable position
fn enforce_nullability(
    non_null: bool,
    completion: Completion,
    path: Vec<PathSegment>,
    label: &str,
    errors: &mut Vec<FieldError>,
) -> Completion {
    match completion {
        Ok(Value::Null) if non_null => {
            tracing::warn!(field = label, "non-null field resolved to null");
            errors.push(FieldError::non_null(path, label));
            Err(NullPropagation)
        }
        Err(NullPropagation) if !non_null => Ok(Value::Null),
        other => other,
    }
}

/// Default resolver: the parent's property named like the field, falling
/// back to its snake_case spelling
pub(crate) fn property_access(parent: Option<&Value>, field_name: &str) -> Value {
    let Some(object) = parent.and_then(Value::as_object) else {
        return Value::Null;
    };

    if let Some(value) = object.get(field_name) {
        return value.clone();
    }

    object
        .get(&camel_to_snake(field_name))
        .cloned()
        .unwrap_or(Value::Null)
}

/// Convert camelCase to snake_case
fn camel_to_snake(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(ch.to_ascii_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

/// Check a non-null value against a built-in scalar
fn coerce_scalar(type_name: &str, value: Value) -> Result<Value, String> {
    if type_name == "ID" {
        if let Some(n) = value.as_i64() {
            return Ok(Value::String(n.to_string()));
        }
    }

    if scalar_accepts(type_name, &value) {
        Ok(value)
    } else {
        Err(format!("{} cannot represent value: {}", type_name, value))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
