//! Reference fragments: the `Post` type with its queries and mutation
//!
//! Each fragment is declared on its own and only meets the others inside the
//! registry, the same way independently written modules would be combined:
//!
//! ```graphql
//! type Post { id: Int!  title: String!  body: String!  published: Boolean! }
//! extend type Query { drafts: [Post!]! }
//! extend type Query { posts: [Post!]! }
//! extend type Mutation { createDraft(title: String!, body: String!): Post! }
//! ```

use crate::core::{
    Arguments, ExtensionDefinition, FieldDefinition, NewPost, ObjectTypeDefinition, RecordFilter,
    RegistrationError, RequestContext, TypeDefinition, TypeRef, resolver_fn,
};
use crate::schema::TypeRegistry;
use anyhow::Result;
use serde_json::Value;

pub fn post_type() -> ObjectTypeDefinition {
    ObjectTypeDefinition::new("Post")
        .field(FieldDefinition::new("id", TypeRef::required("Int")))
        .field(FieldDefinition::new("title", TypeRef::required("String")))
        .field(FieldDefinition::new("body", TypeRef::required("String")))
        .field(FieldDefinition::new("published", TypeRef::required("Boolean")))
}

/// `Query.drafts`: every unpublished post
pub fn drafts_query() -> ExtensionDefinition {
    ExtensionDefinition::query().field(
        FieldDefinition::new("drafts", TypeRef::required_list_of("Post")).resolve_with(
            resolver_fn(|_parent, _args, ctx| async move {
                list_posts(&ctx, RecordFilter::drafts()).await
            }),
        ),
    )
}

/// `Query.posts`: every published post
pub fn posts_query() -> ExtensionDefinition {
    ExtensionDefinition::query().field(
        FieldDefinition::new("posts", TypeRef::required_list_of("Post")).resolve_with(
            resolver_fn(|_parent, _args, ctx| async move {
                list_posts(&ctx, RecordFilter::published()).await
            }),
        ),
    )
}

/// `Mutation.createDraft(title, body)`: store a new unpublished post
pub fn create_draft_mutation() -> ExtensionDefinition {
    ExtensionDefinition::mutation().field(
        FieldDefinition::new("createDraft", TypeRef::required("Post"))
            .argument("title", TypeRef::required("String"))
            .argument("body", TypeRef::required("String"))
            .resolve_with(resolver_fn(|_parent, args, ctx| async move {
                create_draft(&ctx, &args).await
            })),
    )
}

/// All fragments in their declaration order
pub fn definitions() -> Vec<TypeDefinition> {
    vec![
        post_type().into(),
        drafts_query().into(),
        posts_query().into(),
        create_draft_mutation().into(),
    ]
}

pub fn register(registry: &mut TypeRegistry) -> Result<(), RegistrationError> {
    registry.register_all(definitions())?;
    Ok(())
}

async fn list_posts(ctx: &RequestContext, filter: RecordFilter) -> Result<Value> {
    let posts = ctx.db().list_records(&filter).await?;
    Ok(serde_json::to_value(posts)?)
}

async fn create_draft(ctx: &RequestContext, args: &Arguments) -> Result<Value> {
    let fields = NewPost::draft(args.require_str("title")?, args.require_str("body")?);
    let post = ctx.db().create_record(fields).await?;
    Ok(serde_json::to_value(post)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragments_compile() {
        let mut registry = TypeRegistry::new();
        register(&mut registry).unwrap();
        let schema = registry.compile().unwrap();

        assert_eq!(
            schema.sdl(),
            "\
type Post {
  id: Int!
  title: String!
  body: String!
  published: Boolean!
}

type Mutation {
  createDraft(title: String!, body: String!): Post!
}

type Query {
  drafts: [Post!]!
  posts: [Post!]!
}
"
        );
    }

    #[test]
    fn test_registering_twice_fails() {
        let mut registry = TypeRegistry::new();
        register(&mut registry).unwrap();
        assert!(matches!(
            register(&mut registry),
            Err(RegistrationError::DuplicateType { .. })
        ));
    }
}
