//! SDL rendering of a compiled schema
//!
//! The document lists user types first, then the roots, each group in
//! alphabetical order. Fields keep their declaration order. Roots without any
//! field are left out since an empty `type Mutation {}` is not valid SDL.

use super::compiled::{CompiledField, CompiledType};

/// Render the complete document from types already in document order
pub fn render_document<'a>(types: impl IntoIterator<Item = &'a CompiledType>) -> String {
    let blocks: Vec<String> = types
        .into_iter()
        .filter(|ty| !(ty.is_root() && ty.fields.is_empty()))
        .map(render_type)
        .collect();

    let mut sdl = blocks.join("\n\n");
    if !sdl.is_empty() {
        sdl.push('\n');
    }
    sdl
}

/// Render one `type Name { ... }` block
pub fn render_type(ty: &CompiledType) -> String {
    let mut type_def = format!("type {} {{\n", ty.name);
    for field in ty.fields.values() {
        type_def.push_str(&format!("  {}\n", render_field(field)));
    }
    type_def.push('}');
    type_def
}

/// `name: Type` or `name(arg: Type, ...): Type`
pub fn render_field(field: &CompiledField) -> String {
    if field.arguments.is_empty() {
        return format!("{}: {}", field.name, field.ty);
    }

    let arguments = field
        .arguments
        .iter()
        .map(|argument| format!("{}: {}", argument.name, argument.ty))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({}): {}", field.name, arguments, field.ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::definition::{ArgumentDefinition, RootType};
    use crate::core::type_ref::TypeRef;
    use crate::schema::compiled::TypeKind;

    fn field(name: &str, ty: TypeRef) -> CompiledField {
        CompiledField {
            name: name.to_string(),
            ty,
            arguments: Vec::new(),
        }
    }

    #[test]
    fn test_render_field_with_arguments() {
        let mut create = field("createDraft", TypeRef::required("Post"));
        create.arguments = vec![
            ArgumentDefinition {
                name: "title".to_string(),
                ty: TypeRef::required("String"),
            },
            ArgumentDefinition {
                name: "body".to_string(),
                ty: TypeRef::named("String"),
            },
        ];

        assert_eq!(
            render_field(&create),
            "createDraft(title: String!, body: String): Post!"
        );
        assert_eq!(
            render_field(&field("drafts", TypeRef::required_list_of("Post"))),
            "drafts: [Post!]!"
        );
    }

    #[test]
    fn test_empty_roots_are_skipped() {
        let mut post = CompiledType::new("Post", TypeKind::Object);
        post.fields
            .insert("id".to_string(), field("id", TypeRef::required("Int")));
        let mutation = CompiledType::new("Mutation", TypeKind::Root(RootType::Mutation));
        let query = CompiledType::new("Query", TypeKind::Root(RootType::Query));

        assert_eq!(
            render_document([&post, &mutation, &query]),
            "type Post {\n  id: Int!\n}\n"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render_document(std::iter::empty()), "");
    }
}
