//! Typed error handling for schema composition and execution
//!
//! Errors fall in two families:
//!
//! - Startup errors ([`RegistrationError`], [`SchemaValidationError`], wrapped
//!   together as [`SchemaError`]). A registry that fails to register or compile
//!   never produces a schema, so nothing is served.
//! - Per-operation errors. [`ExecutionError`] rejects a whole request before
//!   any resolver runs; [`FieldError`] is attached to one position of an
//!   otherwise executed response.
//!
//! # Example
//!
//! ```rust,ignore
//! match registry.register(ObjectTypeDefinition::new("Post")) {
//!     Err(RegistrationError::DuplicateType { name }) => eprintln!("{name} twice"),
//!     other => other?,
//! }
//! ```

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Startup Errors
// =============================================================================

/// Errors raised while registering type fragments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A concrete object type with this name was already registered
    #[error("Type '{name}' is already registered")]
    DuplicateType { name: String },

    /// Two extensions of the same root type contribute the same field
    #[error("Field '{field}' is already defined on root type '{root}'")]
    DuplicateRootField { root: String, field: String },

    /// A single type or extension declares the same field twice
    #[error("Field '{field}' is declared more than once on '{type_name}'")]
    DuplicateField { type_name: String, field: String },

    /// A single field declares the same argument twice
    #[error("Argument '{argument}' is declared more than once on '{type_name}.{field}'")]
    DuplicateArgument {
        type_name: String,
        field: String,
        argument: String,
    },

    /// Root type names and built-in scalars cannot be registered as object types
    #[error("Type name '{name}' is reserved")]
    ReservedTypeName { name: String },

    /// Not a valid GraphQL name
    #[error("'{name}' is not a valid GraphQL name")]
    InvalidName { name: String },
}

/// Errors raised while validating the merged schema graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaValidationError {
    /// A field references a type that is neither a scalar nor a registered type
    #[error("Field '{type_name}.{field}' references unknown type '{referenced}'")]
    UnknownType {
        type_name: String,
        field: String,
        referenced: String,
    },

    /// Arguments can only carry built-in scalars
    #[error(
        "Argument '{argument}' of '{type_name}.{field}' must be a built-in scalar, found '{referenced}'"
    )]
    NonScalarArgument {
        type_name: String,
        field: String,
        argument: String,
        referenced: String,
    },
}

/// Any error that prevents a schema from being built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Validation(#[from] SchemaValidationError),
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors that reject an operation as a whole
///
/// These are raised before any resolver is invoked, so a rejected operation
/// never touches the data store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The requested field does not exist on its type
    #[error("Cannot query field '{field}' on type '{type_name}'")]
    UnknownField { type_name: String, field: String },

    /// An argument was supplied that the field does not declare
    #[error("Unknown argument '{argument}' on field '{type_name}.{field}'")]
    UnknownArgument {
        type_name: String,
        field: String,
        argument: String,
    },

    /// A non-null argument was omitted or explicitly null
    #[error(
        "Field '{type_name}.{field}' argument '{argument}' of type '{expected}' is required but not provided"
    )]
    MissingArgument {
        type_name: String,
        field: String,
        argument: String,
        expected: String,
    },

    /// A supplied argument value does not match its declared type
    #[error(
        "Argument '{argument}' on field '{type_name}.{field}' expects '{expected}', got {found}"
    )]
    InvalidArgument {
        type_name: String,
        field: String,
        argument: String,
        expected: String,
        found: String,
    },

    /// Sub-selection on a scalar, or missing sub-selection on an object
    #[error("Invalid selection on '{type_name}.{field}': {message}")]
    InvalidSelection {
        type_name: String,
        field: String,
        message: String,
    },

    /// Two selections share a response key but name different fields or arguments
    #[error("Fields selected as '{response_key}' conflict: {message}")]
    FieldConflict {
        response_key: String,
        message: String,
    },

    /// The document could not be parsed
    #[error("Failed to parse query: {message}")]
    Parse { message: String },

    /// The document carries no executable operation
    #[error("No operation found in query")]
    NoOperation,

    /// The requested operation name is not in the document
    #[error("Unknown operation named '{name}'")]
    UnknownOperation { name: String },

    /// Only queries and mutations are executable
    #[error("{operation} operations are not supported")]
    UnsupportedOperation { operation: String },

    /// A fragment spread names a fragment that is not defined
    #[error("Unknown fragment '{name}'")]
    UnknownFragment { name: String },

    /// A variable is used without being declared by the operation
    #[error("Variable '${name}' is not defined")]
    UndefinedVariable { name: String },
}

impl ExecutionError {
    /// HTTP status code for a rejected request
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ExecutionError::UnknownField { .. } => "UNKNOWN_FIELD",
            ExecutionError::UnknownArgument { .. } => "UNKNOWN_ARGUMENT",
            ExecutionError::MissingArgument { .. } => "MISSING_ARGUMENT",
            ExecutionError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            ExecutionError::InvalidSelection { .. } => "INVALID_SELECTION",
            ExecutionError::FieldConflict { .. } => "FIELD_CONFLICT",
            ExecutionError::Parse { .. } => "GRAPHQL_PARSE_FAILED",
            ExecutionError::NoOperation => "NO_OPERATION",
            ExecutionError::UnknownOperation { .. } => "UNKNOWN_OPERATION",
            ExecutionError::UnsupportedOperation { .. } => "UNSUPPORTED_OPERATION",
            ExecutionError::UnknownFragment { .. } => "UNKNOWN_FRAGMENT",
            ExecutionError::UndefinedVariable { .. } => "UNDEFINED_VARIABLE",
        }
    }

    /// Render as a GraphQL response body without data
    pub fn to_response_json(&self) -> Value {
        json!({
            "errors": [{
                "message": self.to_string(),
                "extensions": { "code": self.error_code() }
            }]
        })
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// One step of a response path: a field's response key or a list index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// What went wrong at a field position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The resolver failed, or returned a value of the wrong shape
    Resolver,

    /// A non-null position resolved to null
    NonNullViolation,
}

impl FieldErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            FieldErrorKind::Resolver => "RESOLVER_ERROR",
            FieldErrorKind::NonNullViolation => "NON_NULL_VIOLATION",
        }
    }
}

/// An error attached to one position of an executed response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
    pub path: Vec<PathSegment>,
}

impl FieldError {
    pub fn resolver(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::Resolver,
            message: message.into(),
            path,
        }
    }

    pub fn non_null(path: Vec<PathSegment>, field_label: &str) -> Self {
        Self {
            kind: FieldErrorKind::NonNullViolation,
            message: format!("Cannot return null for non-nullable field {}", field_label),
            path,
        }
    }

    /// Dotted form of the path, e.g. `drafts.0.title`
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn to_json(&self) -> Value {
        json!({
            "message": self.message,
            "path": self.path,
            "extensions": { "code": self.kind.error_code() }
        })
    }
}
