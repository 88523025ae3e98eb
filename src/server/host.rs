//! Server host for transport-agnostic operation dispatch
//!
//! The host bundles everything a transport needs to serve operations: the
//! compiled schema (through the executor) and the context factory. It is
//! built once at startup and shared read-only between requests.

use crate::config::AppConfig;
use crate::core::context::{ContextFactory, RequestContext};
use crate::core::error::ExecutionError;
use crate::execution::{QueryExecutor, Response};
use crate::schema::CompiledSchema;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub struct ServerHost {
    /// Configuration the host was built from
    pub config: Arc<AppConfig>,

    pub executor: QueryExecutor,

    /// Produces one fresh context per operation
    pub contexts: ContextFactory,
}

impl ServerHost {
    pub fn new(schema: Arc<CompiledSchema>, contexts: ContextFactory, config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            executor: QueryExecutor::new(schema),
            contexts,
        }
    }

    pub fn schema(&self) -> &CompiledSchema {
        self.executor.schema()
    }

    /// Create the context for a new operation
    pub fn new_context(&self) -> RequestContext {
        self.contexts.create()
    }

    /// Single entry point for transports: run one document in a fresh context
    pub async fn handle(
        &self,
        query: &str,
        operation_name: Option<&str>,
        variables: HashMap<String, Value>,
    ) -> Result<Response, ExecutionError> {
        let ctx = self.new_context();
        self.executor
            .execute_document(&ctx, query, operation_name, variables)
            .await
    }
}
