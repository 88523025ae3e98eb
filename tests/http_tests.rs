//! End-to-end tests of the GraphQL HTTP exposure

use axum::http::StatusCode;
use axum_test::TestServer;
use schemata::prelude::*;

fn create_test_server(config: AppConfig) -> TestServer {
    let app = ServerBuilder::new()
        .with_config(config)
        .register_all(schemata::blog::definitions())
        .expect("Failed to register blog fragments")
        .build()
        .expect("Failed to build router");

    TestServer::try_new(app).expect("Failed to create test server")
}

fn seeded_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.store.seed = vec![NewPost::draft("Nexus", "...")];
    config
}

#[tokio::test]
async fn test_query_over_http() {
    let server = create_test_server(seeded_config());

    let response = server
        .post("/graphql")
        .json(&json!({"query": "{ drafts { id title } }"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({"data": {"drafts": [{"id": 1, "title": "Nexus"}]}}));
}

#[tokio::test]
async fn test_mutation_then_query_over_http() {
    let server = create_test_server(seeded_config());

    let created = server
        .post("/graphql")
        .json(&json!({
            "query": "mutation Create($title: String!, $body: String!) { createDraft(title: $title, body: $body) { id published } }",
            "variables": {"title": "Hello", "body": "World"},
            "operationName": "Create"
        }))
        .await;

    created.assert_status_ok();
    let body: Value = created.json();
    assert_eq!(body["data"]["createDraft"], json!({"id": 2, "published": false}));

    let listed = server
        .post("/graphql")
        .json(&json!({"query": "{ drafts { id } }"}))
        .await;
    let body: Value = listed.json();
    assert_eq!(body["data"]["drafts"], json!([{"id": 1}, {"id": 2}]));
}

#[tokio::test]
async fn test_unknown_field_returns_400() {
    let server = create_test_server(seeded_config());

    let response = server
        .post("/graphql")
        .json(&json!({"query": "{ nonexistent }"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["extensions"]["code"], "UNKNOWN_FIELD");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_schema_endpoint_serves_sdl() {
    let server = create_test_server(AppConfig::default());

    let response = server.get("/graphql/schema").await;

    response.assert_status_ok();
    let sdl = response.text();
    assert!(sdl.starts_with("type Post {"));
    assert!(sdl.contains("createDraft(title: String!, body: String!): Post!"));
}

#[tokio::test]
async fn test_custom_graphql_path() {
    let mut config = AppConfig::default();
    config.server.graphql_path = "/api/graphql".to_string();
    let server = create_test_server(config);

    let response = server
        .post("/api/graphql")
        .json(&json!({"query": "{ posts { id } }"}))
        .await;
    response.assert_status_ok();

    server.get("/api/graphql/schema").await.assert_status_ok();
}
