//! Type fragments: object types, root extensions and their fields
//!
//! Fragments are plain values. They are collected by a
//! [`TypeRegistry`](crate::schema::TypeRegistry) and only become a schema
//! once compiled, so a fragment may reference types registered after it.

use super::resolver::Resolver;
use super::type_ref::TypeRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The two entry-point types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RootType {
    Query,
    Mutation,
}

impl RootType {
    pub fn name(&self) -> &'static str {
        match self {
            RootType::Query => "Query",
            RootType::Mutation => "Mutation",
        }
    }

    pub fn is_root_name(name: &str) -> bool {
        name == "Query" || name == "Mutation"
    }
}

impl fmt::Display for RootType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RootType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Query" | "query" => Ok(RootType::Query),
            "Mutation" | "mutation" => Ok(RootType::Mutation),
            other => Err(format!("'{}' is not a root type", other)),
        }
    }
}

/// A declared argument of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    pub name: String,
    pub ty: TypeRef,
}

/// A field of an object type or root extension
#[derive(Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: Vec<ArgumentDefinition>,
    /// `None` reads the parent value's property of the same name
    pub resolver: Option<Arc<dyn Resolver>>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            arguments: Vec::new(),
            resolver: None,
        }
    }

    pub fn argument(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.arguments.push(ArgumentDefinition {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn resolve_with(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("name", &self.name)
            .field("ty", &self.ty.to_string())
            .field("arguments", &self.arguments)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

/// A concrete object type
#[derive(Debug, Clone)]
pub struct ObjectTypeDefinition {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

impl ObjectTypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }
}

/// Additional fields for `Query` or `Mutation`
#[derive(Debug, Clone)]
pub struct ExtensionDefinition {
    pub root: RootType,
    pub fields: Vec<FieldDefinition>,
}

impl ExtensionDefinition {
    pub fn new(root: RootType) -> Self {
        Self {
            root,
            fields: Vec::new(),
        }
    }

    pub fn query() -> Self {
        Self::new(RootType::Query)
    }

    pub fn mutation() -> Self {
        Self::new(RootType::Mutation)
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }
}

/// One registry entry
#[derive(Debug, Clone)]
pub enum TypeDefinition {
    Object(ObjectTypeDefinition),
    Extension(ExtensionDefinition),
}

impl TypeDefinition {
    /// Name of the declared type, or of the extended root
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Object(object) => &object.name,
            TypeDefinition::Extension(extension) => extension.root.name(),
        }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        match self {
            TypeDefinition::Object(object) => &object.fields,
            TypeDefinition::Extension(extension) => &extension.fields,
        }
    }
}

impl From<ObjectTypeDefinition> for TypeDefinition {
    fn from(object: ObjectTypeDefinition) -> Self {
        TypeDefinition::Object(object)
    }
}

impl From<ExtensionDefinition> for TypeDefinition {
    fn from(extension: ExtensionDefinition) -> Self {
        TypeDefinition::Extension(extension)
    }
}
