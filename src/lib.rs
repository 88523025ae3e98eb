//! # Schemata
//!
//! A declarative GraphQL layer: type fragments are declared independently,
//! merged into one schema at startup and executed against a data store.
//!
//! ## Features
//!
//! - **Fragment Registry**: Object types and `Query`/`Mutation` extensions declared by separate modules
//! - **Schema Compiler**: Deterministic SDL and a type model for external generators
//! - **Query Executor**: Selection validation, resolver dispatch and null propagation
//! - **Per-Operation Context**: Each operation sees the data store through its own context
//! - **HTTP Exposure**: axum router serving operations and the SDL
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use schemata::prelude::*;
//!
//! let mut registry = TypeRegistry::new();
//! schemata::blog::register(&mut registry)?;
//!
//! let executor = QueryExecutor::new(Arc::new(registry.compile()?));
//! let contexts = ContextFactory::new(Arc::new(InMemoryDb::new()));
//!
//! let response = executor
//!     .execute(
//!         &contexts.create(),
//!         RootType::Mutation,
//!         "createDraft",
//!         Arguments::new().with("title", "Nexus").with("body", "..."),
//!         leaf_fields(&["id", "published"]),
//!     )
//!     .await?;
//! ```

pub mod blog;
pub mod config;
pub mod core;
pub mod execution;
pub mod schema;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Definitions ===
    pub use crate::core::{
        ArgumentDefinition, Arguments, ExtensionDefinition, FieldDefinition,
        ObjectTypeDefinition, Resolver, RootType, TypeDefinition, TypeRef, resolver_fn,
    };

    // === Context & Store ===
    pub use crate::core::{ContextFactory, Db, NewPost, Post, RecordFilter, RequestContext};
    pub use crate::storage::InMemoryDb;

    // === Errors ===
    pub use crate::core::{
        ExecutionError, FieldError, FieldErrorKind, PathSegment, RegistrationError, SchemaError,
        SchemaValidationError,
    };

    // === Schema ===
    pub use crate::schema::{CompiledSchema, TypeModel, TypeRegistry};

    // === Execution ===
    pub use crate::execution::{FieldSelection, QueryExecutor, Response, leaf_fields};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{GraphQLExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
    pub use std::sync::Arc;

    // === Axum ===
    pub use axum::Router;
}
