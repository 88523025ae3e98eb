//! Integration tests for executing GraphQL documents

use schemata::prelude::*;
use std::collections::HashMap;

fn setup() -> (QueryExecutor, ContextFactory, InMemoryDb) {
    let mut registry = TypeRegistry::new();
    schemata::blog::register(&mut registry).unwrap();
    let executor = QueryExecutor::new(Arc::new(registry.compile().unwrap()));

    let db = InMemoryDb::seeded(vec![NewPost::draft("Nexus", "...")]);
    let contexts = ContextFactory::new(Arc::new(db.clone()));
    (executor, contexts, db)
}

fn vars(value: Value) -> HashMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_query_document() {
    let (executor, contexts, _db) = setup();

    let response = executor
        .execute_document(
            &contexts.create(),
            "{ drafts { id title published } }",
            None,
            HashMap::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.to_json(),
        json!({"data": {"drafts": [{"id": 1, "title": "Nexus", "published": false}]}})
    );
}

#[tokio::test]
async fn test_mutation_with_variables() {
    let (executor, contexts, db) = setup();

    let response = executor
        .execute_document(
            &contexts.create(),
            r#"
            mutation Create($title: String!, $body: String!) {
                createDraft(title: $title, body: $body) { id title }
            }
            "#,
            None,
            vars(json!({"title": "Hello", "body": "World"})),
        )
        .await
        .unwrap();

    assert_eq!(
        response.get("createDraft"),
        Some(&json!({"id": 2, "title": "Hello"}))
    );
    assert_eq!(db.list_records(&RecordFilter::drafts()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_aliases_and_fragments() {
    let (executor, contexts, _db) = setup();

    let response = executor
        .execute_document(
            &contexts.create(),
            r#"
            query {
                unpublished: drafts { ...PostSummary }
                live: posts { ... on Post { id } }
            }
            fragment PostSummary on Post { id headline: title }
            "#,
            None,
            HashMap::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.data,
        Some(json!({
            "unpublished": [{"id": 1, "headline": "Nexus"}],
            "live": []
        }))
    );
}

#[tokio::test]
async fn test_operation_selection_by_name() {
    let (executor, contexts, _db) = setup();
    let document = r#"
        query Drafts { drafts { id } }
        query Posts { posts { id } }
    "#;

    let response = executor
        .execute_document(&contexts.create(), document, Some("Posts"), HashMap::new())
        .await
        .unwrap();
    assert_eq!(response.data, Some(json!({"posts": []})));

    let err = executor
        .execute_document(&contexts.create(), document, Some("Missing"), HashMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutionError::UnknownOperation { .. }));
}

#[tokio::test]
async fn test_skip_and_include() {
    let (executor, contexts, _db) = setup();

    let response = executor
        .execute_document(
            &contexts.create(),
            r#"
            query ($withBody: Boolean!) {
                drafts { id body @include(if: $withBody) title @skip(if: true) }
            }
            "#,
            None,
            vars(json!({"withBody": false})),
        )
        .await
        .unwrap();

    assert_eq!(response.get("drafts"), Some(&json!([{"id": 1}])));
}

#[tokio::test]
async fn test_subscription_is_rejected() {
    let (executor, contexts, _db) = setup();

    let err = executor
        .execute_document(
            &contexts.create(),
            "subscription { drafts { id } }",
            None,
            HashMap::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::UnsupportedOperation { .. }));
}

#[tokio::test]
async fn test_parse_error() {
    let (executor, contexts, _db) = setup();

    let err = executor
        .execute_document(&contexts.create(), "{ drafts { id ", None, HashMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::Parse { .. }));
    assert_eq!(err.error_code(), "GRAPHQL_PARSE_FAILED");
}

#[tokio::test]
async fn test_unknown_field_in_document_does_not_mutate() {
    let (executor, contexts, db) = setup();

    let err = executor
        .execute_document(
            &contexts.create(),
            r#"mutation { createDraft(title: "a", body: "b") { id } nonexistent }"#,
            None,
            HashMap::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::UnknownField { .. }));
    assert_eq!(db.list_records(&RecordFilter::all()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_aliased_mutations_with_different_arguments_conflict() {
    let (executor, contexts, db) = setup();

    let err = executor
        .execute_document(
            &contexts.create(),
            r#"
            mutation {
                x: createDraft(title: "A", body: "B") { id }
                x: createDraft(title: "C", body: "D") { title }
            }
            "#,
            None,
            HashMap::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::FieldConflict { .. }));
    assert_eq!(db.list_records(&RecordFilter::all()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_one_alias_for_two_fields_conflicts() {
    let (executor, contexts, _db) = setup();

    let err = executor
        .execute_document(
            &contexts.create(),
            "{ x: drafts { id } x: posts { title } }",
            None,
            HashMap::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "FIELD_CONFLICT");
}

#[tokio::test]
async fn test_undeclared_variable() {
    let (executor, contexts, _db) = setup();

    let err = executor
        .execute_document(
            &contexts.create(),
            r#"mutation { createDraft(title: $title, body: "b") { id } }"#,
            None,
            HashMap::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ExecutionError::UndefinedVariable {
            name: "title".to_string()
        }
    );
}
