//! Schema compiler: merges registry fragments into one validated schema
//!
//! Compilation is a pure function of the entry list:
//!
//! 1. Partition entries into concrete object types and root extensions.
//! 2. Merge `Query` and `Mutation` extensions into the two root types,
//!    rejecting field collisions.
//! 3. Check every field and argument type reference against the built-in
//!    scalars and the registered object types.
//! 4. Render the SDL document.
//! 5. Build the `type -> field -> resolver` lookup table.
//!
//! The same entries always yield byte-identical SDL.

use crate::core::definition::{FieldDefinition, RootType, TypeDefinition};
use crate::core::error::{RegistrationError, SchemaError, SchemaValidationError};
use crate::core::type_ref::is_builtin_scalar;
use std::collections::{BTreeMap, HashMap};

use super::compiled::{CompiledField, CompiledSchema, CompiledType, ResolverTable, TypeKind};
use super::registry::check_definition;
use super::sdl;

/// Compile a registry snapshot
pub fn compile(entries: &[TypeDefinition]) -> Result<CompiledSchema, SchemaError> {
    let mut objects = BTreeMap::new();
    let mut query = CompiledType::new(RootType::Query.name(), TypeKind::Root(RootType::Query));
    let mut mutation = CompiledType::new(
        RootType::Mutation.name(),
        TypeKind::Root(RootType::Mutation),
    );
    let mut resolvers = ResolverTable::new();

    for entry in entries {
        check_definition(entry)?;

        match entry {
            TypeDefinition::Object(object) => {
                if objects.contains_key(&object.name) {
                    return Err(RegistrationError::DuplicateType {
                        name: object.name.clone(),
                    }
                    .into());
                }
                let mut compiled = CompiledType::new(object.name.clone(), TypeKind::Object);
                for field in &object.fields {
                    add_field(&mut compiled, field, &mut resolvers)?;
                }
                objects.insert(object.name.clone(), compiled);
            }
            TypeDefinition::Extension(extension) => {
                let root = match extension.root {
                    RootType::Query => &mut query,
                    RootType::Mutation => &mut mutation,
                };
                for field in &extension.fields {
                    add_field(root, field, &mut resolvers)?;
                }
            }
        }
    }

    for ty in objects.values().chain([&mutation, &query]) {
        validate_references(ty, |name| objects.contains_key(name))?;
    }

    let sdl = sdl::render_document(objects.values().chain([&mutation, &query]));

    tracing::info!(
        types = objects.len(),
        query_fields = query.fields.len(),
        mutation_fields = mutation.fields.len(),
        resolvers = resolvers.values().map(HashMap::len).sum::<usize>(),
        "schema compiled"
    );

    Ok(CompiledSchema {
        objects,
        query,
        mutation,
        resolvers,
        sdl,
    })
}

fn add_field(
    ty: &mut CompiledType,
    field: &FieldDefinition,
    resolvers: &mut ResolverTable,
) -> Result<(), RegistrationError> {
    if ty.fields.contains_key(&field.name) {
        return Err(match ty.kind {
            TypeKind::Root(root) => RegistrationError::DuplicateRootField {
                root: root.name().to_string(),
                field: field.name.clone(),
            },
            TypeKind::Object => RegistrationError::DuplicateField {
                type_name: ty.name.clone(),
                field: field.name.clone(),
            },
        });
    }

    if let Some(resolver) = &field.resolver {
        resolvers
            .entry(ty.name.clone())
            .or_default()
            .insert(field.name.clone(), resolver.clone());
    }

    ty.fields.insert(
        field.name.clone(),
        CompiledField {
            name: field.name.clone(),
            ty: field.ty.clone(),
            arguments: field.arguments.clone(),
        },
    );
    Ok(())
}

fn validate_references(
    ty: &CompiledType,
    is_registered: impl Fn(&str) -> bool,
) -> Result<(), SchemaValidationError> {
    for field in ty.fields.values() {
        let referenced = &field.ty.name;
        if !is_builtin_scalar(referenced) && !is_registered(referenced) {
            return Err(SchemaValidationError::UnknownType {
                type_name: ty.name.clone(),
                field: field.name.clone(),
                referenced: referenced.clone(),
            });
        }

        for argument in &field.arguments {
            if !argument.ty.is_builtin_scalar() {
                return Err(SchemaValidationError::NonScalarArgument {
                    type_name: ty.name.clone(),
                    field: field.name.clone(),
                    argument: argument.name.clone(),
                    referenced: argument.ty.name.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::definition::{ExtensionDefinition, ObjectTypeDefinition};
    use crate::core::resolver::resolver_fn;
    use crate::core::type_ref::TypeRef;
    use serde_json::Value;

    fn post() -> ObjectTypeDefinition {
        ObjectTypeDefinition::new("Post")
            .field(FieldDefinition::new("id", TypeRef::named("Int")))
            .field(FieldDefinition::new("title", TypeRef::named("String")))
            .field(FieldDefinition::new("body", TypeRef::named("String")))
            .field(FieldDefinition::new("published", TypeRef::named("Boolean")))
    }

    fn noop() -> std::sync::Arc<dyn crate::core::resolver::Resolver> {
        resolver_fn(|_, _, _| async { anyhow::Ok(Value::Null) })
    }

    fn entries() -> Vec<TypeDefinition> {
        vec![
            ExtensionDefinition::mutation()
                .field(
                    FieldDefinition::new("createDraft", TypeRef::required("Post"))
                        .argument("title", TypeRef::required("String"))
                        .argument("body", TypeRef::required("String"))
                        .resolve_with(noop()),
                )
                .into(),
            ExtensionDefinition::query()
                .field(
                    FieldDefinition::new("drafts", TypeRef::required_list_of("Post"))
                        .resolve_with(noop()),
                )
                .into(),
            ObjectTypeDefinition::new("Comment")
                .field(FieldDefinition::new("text", TypeRef::named("String")))
                .into(),
            post().into(),
            ExtensionDefinition::query()
                .field(FieldDefinition::new("comments", TypeRef::list_of("Comment")))
                .into(),
        ]
    }

    #[test]
    fn test_sdl_layout() {
        let schema = compile(&entries()).unwrap();

        let expected = "\
type Comment {
  text: String
}

type Post {
  id: Int
  title: String
  body: String
  published: Boolean
}

type Mutation {
  createDraft(title: String!, body: String!): Post!
}

type Query {
  drafts: [Post!]!
  comments: [Comment]
}
";
        assert_eq!(schema.sdl(), expected);
    }

    #[test]
    fn test_compile_is_deterministic() {
        let first = compile(&entries()).unwrap();
        let second = compile(&entries()).unwrap();
        assert_eq!(first.sdl(), second.sdl());
        assert_eq!(first.type_model(), second.type_model());
    }

    #[test]
    fn test_extensions_merge_in_declaration_order() {
        let schema = compile(&entries()).unwrap();
        let fields: Vec<_> = schema.root(RootType::Query).fields.keys().collect();
        assert_eq!(fields, ["drafts", "comments"]);
    }

    #[test]
    fn test_resolver_lookup() {
        let schema = compile(&entries()).unwrap();
        assert!(schema.resolver("Query", "drafts").is_some());
        assert!(schema.resolver("Mutation", "createDraft").is_some());
        assert!(schema.resolver("Query", "comments").is_none());
        assert!(schema.resolver("Post", "title").is_none());
        assert!(schema.resolver("Missing", "drafts").is_none());
        assert_eq!(schema.resolver_count(), 2);
    }

    #[test]
    fn test_unknown_reference_names_type_and_field() {
        let entries: Vec<TypeDefinition> = vec![
            post()
                .field(FieldDefinition::new("author", TypeRef::required("Author")))
                .into(),
        ];

        let err = compile(&entries).unwrap_err();
        assert_eq!(
            err,
            SchemaError::Validation(SchemaValidationError::UnknownType {
                type_name: "Post".to_string(),
                field: "author".to_string(),
                referenced: "Author".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_reference_from_root_field() {
        let entries: Vec<TypeDefinition> = vec![
            ExtensionDefinition::query()
                .field(FieldDefinition::new("users", TypeRef::list_of("User")))
                .into(),
        ];
        assert!(matches!(
            compile(&entries),
            Err(SchemaError::Validation(SchemaValidationError::UnknownType { .. }))
        ));
    }

    #[test]
    fn test_object_argument_is_rejected() {
        let entries: Vec<TypeDefinition> = vec![
            post().into(),
            ExtensionDefinition::mutation()
                .field(
                    FieldDefinition::new("save", TypeRef::named("Post"))
                        .argument("post", TypeRef::required("Post")),
                )
                .into(),
        ];
        assert!(matches!(
            compile(&entries),
            Err(SchemaError::Validation(SchemaValidationError::NonScalarArgument { .. }))
        ));
    }

    #[test]
    fn test_forward_references_resolve_regardless_of_order() {
        let entries: Vec<TypeDefinition> = vec![
            ExtensionDefinition::query()
                .field(FieldDefinition::new("posts", TypeRef::required_list_of("Post")))
                .into(),
            post().into(),
        ];
        assert!(compile(&entries).is_ok());
    }

    #[test]
    fn test_colliding_extensions_fail_at_compile_time() {
        let field = || FieldDefinition::new("drafts", TypeRef::list_of("Post"));
        let entries: Vec<TypeDefinition> = vec![
            post().into(),
            ExtensionDefinition::query().field(field()).into(),
            ExtensionDefinition::query().field(field()).into(),
        ];
        assert_eq!(
            compile(&entries).unwrap_err(),
            SchemaError::Registration(RegistrationError::DuplicateRootField {
                root: "Query".to_string(),
                field: "drafts".to_string(),
            })
        );
    }

    #[test]
    fn test_duplicate_types_fail_at_compile_time() {
        let entries: Vec<TypeDefinition> = vec![post().into(), post().into()];
        assert!(matches!(
            compile(&entries),
            Err(SchemaError::Registration(RegistrationError::DuplicateType { .. }))
        ));
    }

    #[test]
    fn test_empty_registry_compiles_to_empty_document() {
        let schema = compile(&[]).unwrap();
        assert_eq!(schema.sdl(), "");
        assert!(schema.root(RootType::Query).fields.is_empty());
        assert!(schema.is_object_type("Query"));
    }
}
