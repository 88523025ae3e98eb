//! Core module containing the definition types, resolver contract and store capability

pub mod arguments;
pub mod context;
pub mod definition;
pub mod error;
pub mod resolver;
pub mod store;
pub mod type_ref;

pub use arguments::Arguments;
pub use context::{ContextFactory, RequestContext};
pub use definition::{
    ArgumentDefinition, ExtensionDefinition, FieldDefinition, ObjectTypeDefinition, RootType,
    TypeDefinition,
};
pub use error::{
    ExecutionError, FieldError, FieldErrorKind, PathSegment, RegistrationError, SchemaError,
    SchemaValidationError,
};
pub use resolver::{FnResolver, Resolver, resolver_fn};
pub use store::{Db, NewPost, Post, RecordFilter};
pub use type_ref::{BUILT_IN_SCALARS, TypeRef, is_builtin_scalar, is_valid_name, scalar_accepts};
