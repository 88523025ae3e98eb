//! Query execution against a compiled schema
//!
//! The executor is split into several sub-modules:
//! - `executor`: operation entry points
//! - `document`: GraphQL document parsing into selections
//! - `validation`: up-front checks of the requested selection
//! - `field_resolver`: field resolution and null propagation
//! - `selection` / `response`: input and output values

pub mod document;
pub mod executor;
mod field_resolver;
pub mod response;
pub mod selection;
pub mod validation;

pub use document::{ParsedOperation, parse_operation};
pub use executor::QueryExecutor;
pub use response::Response;
pub use selection::{FieldSelection, leaf_fields};
