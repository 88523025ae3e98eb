//! The compiled, read-only schema

use crate::core::definition::{ArgumentDefinition, RootType};
use crate::core::resolver::Resolver;
use crate::core::type_ref::TypeRef;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use super::model::TypeModel;

/// A field as the executor sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: Vec<ArgumentDefinition>,
}

impl CompiledField {
    pub fn argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments.iter().find(|argument| argument.name == name)
    }
}

/// Whether a type is user-declared or one of the roots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Object,
    Root(RootType),
}

/// An object type with its fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledType {
    pub name: String,
    pub kind: TypeKind,
    pub fields: IndexMap<String, CompiledField>,
}

impl CompiledType {
    pub(crate) fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: IndexMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.fields.get(name)
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, TypeKind::Root(_))
    }
}

/// Explicit resolvers keyed by type name, then field name
pub(crate) type ResolverTable = HashMap<String, HashMap<String, Arc<dyn Resolver>>>;

/// The merged schema: user object types, `Query`, `Mutation`, the resolver
/// lookup table and the rendered SDL document
///
/// Built once from a registry snapshot and never mutated, so it can be shared
/// across concurrent operations behind an `Arc` without locking.
pub struct CompiledSchema {
    pub(crate) objects: BTreeMap<String, CompiledType>,
    pub(crate) query: CompiledType,
    pub(crate) mutation: CompiledType,
    pub(crate) resolvers: ResolverTable,
    pub(crate) sdl: String,
}

impl CompiledSchema {
    /// Any type by name, roots included
    pub fn get_type(&self, name: &str) -> Option<&CompiledType> {
        match name {
            "Query" => Some(&self.query),
            "Mutation" => Some(&self.mutation),
            other => self.objects.get(other),
        }
    }

    pub fn root(&self, root: RootType) -> &CompiledType {
        match root {
            RootType::Query => &self.query,
            RootType::Mutation => &self.mutation,
        }
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&CompiledField> {
        self.get_type(type_name)?.field(field_name)
    }

    /// Explicit resolver for a field; `None` means default property access
    pub fn resolver(&self, type_name: &str, field_name: &str) -> Option<&Arc<dyn Resolver>> {
        self.resolvers.get(type_name)?.get(field_name)
    }

    pub(crate) fn resolver_count(&self) -> usize {
        self.resolvers.values().map(HashMap::len).sum()
    }

    /// True for registered object types and the roots
    pub fn is_object_type(&self, name: &str) -> bool {
        self.get_type(name).is_some()
    }

    /// User object types in alphabetical order
    pub fn object_types(&self) -> impl Iterator<Item = &CompiledType> {
        self.objects.values()
    }

    /// Every type in document order: user types, then `Mutation`, then `Query`
    pub fn types(&self) -> impl Iterator<Item = &CompiledType> {
        self.objects
            .values()
            .chain([&self.mutation, &self.query])
    }

    /// Textual schema document
    pub fn sdl(&self) -> &str {
        &self.sdl
    }

    /// Structural description for external type-declaration generators
    pub fn type_model(&self) -> TypeModel {
        TypeModel::from_schema(self)
    }
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("objects", &self.objects.keys().collect::<Vec<_>>())
            .field("query", &self.query.fields.keys().collect::<Vec<_>>())
            .field("mutation", &self.mutation.fields.keys().collect::<Vec<_>>())
            .field("resolvers", &self.resolver_count())
            .finish()
    }
}
