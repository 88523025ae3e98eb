//! Type registry collecting independently declared fragments

use crate::core::definition::{RootType, TypeDefinition};
use crate::core::error::{RegistrationError, SchemaError};
use crate::core::type_ref::{is_builtin_scalar, is_valid_name};
use std::collections::{HashMap, HashSet};

use super::compiled::CompiledSchema;
use super::compiler;

/// Ordered collection of type fragments
///
/// Entries keep their declaration order. Concrete type names must be unique;
/// root extensions may repeat as long as their fields do not collide. Type
/// references are not resolved here, so fragments can reference types that
/// are registered later.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: Vec<TypeDefinition>,
    type_names: HashSet<String>,
    root_fields: HashMap<RootType, HashSet<String>>,
}

impl TypeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object type or root extension
    ///
    /// Fails immediately on a duplicate concrete type name or a root field
    /// already contributed by an earlier extension. A failed registration
    /// leaves the registry unchanged.
    pub fn register(
        &mut self,
        definition: impl Into<TypeDefinition>,
    ) -> Result<&mut Self, RegistrationError> {
        let definition = definition.into();
        check_definition(&definition)?;

        match &definition {
            TypeDefinition::Object(object) => {
                if self.type_names.contains(&object.name) {
                    return Err(RegistrationError::DuplicateType {
                        name: object.name.clone(),
                    });
                }
                self.type_names.insert(object.name.clone());
            }
            TypeDefinition::Extension(extension) => {
                let existing = self.root_fields.entry(extension.root).or_default();
                if let Some(field) = extension
                    .fields
                    .iter()
                    .find(|field| existing.contains(&field.name))
                {
                    return Err(RegistrationError::DuplicateRootField {
                        root: extension.root.name().to_string(),
                        field: field.name.clone(),
                    });
                }
                existing.extend(extension.fields.iter().map(|field| field.name.clone()));
            }
        }

        tracing::debug!(type_name = definition.name(), "registered type fragment");
        self.entries.push(definition);
        Ok(self)
    }

    /// Register several fragments in order, stopping at the first failure
    pub fn register_all(
        &mut self,
        definitions: impl IntoIterator<Item = TypeDefinition>,
    ) -> Result<&mut Self, RegistrationError> {
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(self)
    }

    /// Snapshot of all entries in declaration order
    pub fn entries(&self) -> &[TypeDefinition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compile the current snapshot
    pub fn compile(&self) -> Result<CompiledSchema, SchemaError> {
        compiler::compile(&self.entries)
    }
}

/// Checks that need nothing but the fragment itself
pub(crate) fn check_definition(definition: &TypeDefinition) -> Result<(), RegistrationError> {
    let type_name = definition.name();

    if let TypeDefinition::Object(object) = definition {
        check_name(&object.name)?;
        if RootType::is_root_name(&object.name) || is_builtin_scalar(&object.name) {
            return Err(RegistrationError::ReservedTypeName {
                name: object.name.clone(),
            });
        }
    }

    let mut field_names = HashSet::new();
    for field in definition.fields() {
        check_name(&field.name)?;
        check_name(&field.ty.name)?;
        if !field_names.insert(field.name.as_str()) {
            return Err(RegistrationError::DuplicateField {
                type_name: type_name.to_string(),
                field: field.name.clone(),
            });
        }

        let mut argument_names = HashSet::new();
        for argument in &field.arguments {
            check_name(&argument.name)?;
            check_name(&argument.ty.name)?;
            if !argument_names.insert(argument.name.as_str()) {
                return Err(RegistrationError::DuplicateArgument {
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                    argument: argument.name.clone(),
                });
            }
        }
    }

    Ok(())
}

fn check_name(name: &str) -> Result<(), RegistrationError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(RegistrationError::InvalidName {
            name: name.to_string(),
        })
    }
}
