//! Serializable shape of a compiled schema
//!
//! This is what an external generator needs to emit type declarations for
//! consumers: every type with its fields, base types, nullability and
//! list-ness. Generation itself happens outside this crate.

use serde::{Deserialize, Serialize};

use super::compiled::{CompiledSchema, CompiledType, TypeKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeModel {
    pub types: Vec<TypeShape>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeShape {
    pub name: String,
    pub root: bool,
    pub fields: Vec<FieldShape>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldShape {
    pub name: String,
    /// Base type name without wrappers
    #[serde(rename = "type")]
    pub type_name: String,
    pub scalar: bool,
    pub nullable: bool,
    pub list: bool,
    /// Only meaningful when `list` is true
    pub element_nullable: bool,
    pub arguments: Vec<ArgumentShape>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentShape {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub nullable: bool,
}

impl TypeModel {
    pub fn from_schema(schema: &CompiledSchema) -> Self {
        Self {
            types: schema.types().map(TypeShape::from_type).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeShape> {
        self.types.iter().find(|ty| ty.name == name)
    }
}

impl TypeShape {
    fn from_type(ty: &CompiledType) -> Self {
        let fields = ty
            .fields
            .values()
            .map(|field| FieldShape {
                name: field.name.clone(),
                type_name: field.ty.name.clone(),
                scalar: field.ty.is_builtin_scalar(),
                nullable: !field.ty.non_null,
                list: field.ty.list,
                element_nullable: field.ty.list && !field.ty.list_element_non_null,
                arguments: field
                    .arguments
                    .iter()
                    .map(|argument| ArgumentShape {
                        name: argument.name.clone(),
                        type_name: argument.ty.name.clone(),
                        nullable: !argument.ty.non_null,
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: ty.name.clone(),
            root: matches!(ty.kind, TypeKind::Root(_)),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldShape> {
        self.fields.iter().find(|field| field.name == name)
    }
}
