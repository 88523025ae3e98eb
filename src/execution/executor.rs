//! Operation executor

use crate::core::arguments::Arguments;
use crate::core::context::RequestContext;
use crate::core::definition::RootType;
use crate::core::error::{ExecutionError, PathSegment};
use crate::schema::CompiledSchema;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Instrument;

use super::document;
use super::field_resolver::{FieldResolver, NullPropagation};
use super::response::Response;
use super::selection::FieldSelection;
use super::validation::validate_selections;

/// Executes operations against a compiled schema
///
/// The executor holds no per-request state: every call takes its own
/// [`RequestContext`], so overlapping operations only share the read-only
/// schema and whatever the data store itself shares.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    schema: Arc<CompiledSchema>,
}

impl QueryExecutor {
    pub fn new(schema: Arc<CompiledSchema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &CompiledSchema {
        &self.schema
    }

    /// Execute a single root field
    ///
    /// `selection` is the sub-selection requested on the field's value; it
    /// is empty for scalar-typed fields.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        operation: RootType,
        field_name: &str,
        arguments: Arguments,
        selection: Vec<FieldSelection>,
    ) -> Result<Response, ExecutionError> {
        let field = FieldSelection {
            name: field_name.to_string(),
            alias: None,
            arguments,
            selection,
        };
        self.execute_operation(ctx, operation, &[field]).await
    }

    /// Execute a GraphQL document
    pub async fn execute_document(
        &self,
        ctx: &RequestContext,
        query: &str,
        operation_name: Option<&str>,
        variables: HashMap<String, Value>,
    ) -> Result<Response, ExecutionError> {
        let parsed = document::parse_operation(query, operation_name, &variables)?;
        self.execute_operation(ctx, parsed.operation, &parsed.selections)
            .await
    }

    /// Execute root fields of one operation
    ///
    /// The whole selection is validated first; an invalid request fails
    /// without invoking any resolver. Root fields then resolve one after the
    /// other in request order, which keeps mutations serial.
    pub async fn execute_operation(
        &self,
        ctx: &RequestContext,
        operation: RootType,
        selections: &[FieldSelection],
    ) -> Result<Response, ExecutionError> {
        let span = tracing::debug_span!(
            "operation",
            operation_id = ctx.operation_id(),
            operation = %operation
        );

        async move {
            let root = self.schema.root(operation);
            if let Err(err) = validate_selections(&self.schema, &root.name, selections) {
                tracing::debug!(error = %err, "operation rejected");
                return Err(err);
            }

            let resolver = FieldResolver::new(&self.schema, ctx);
            let mut errors = Vec::new();
            let mut data = Map::new();
            let mut propagated = false;

            for selection in selections {
                let key = selection.response_key().to_string();
                let path = vec![PathSegment::Field(key.clone())];
                match resolver
                    .resolve_field(&root.name, None, selection, path, &mut errors)
                    .await
                {
                    Ok(value) => {
                        data.insert(key, value);
                    }
                    Err(NullPropagation) => propagated = true,
                }
            }

            tracing::debug!(errors = errors.len(), "operation finished");

            Ok(Response {
                data: (!propagated).then_some(Value::Object(data)),
                errors,
            })
        }
        .instrument(span)
        .await
    }
}
