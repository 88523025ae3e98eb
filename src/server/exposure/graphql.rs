//! GraphQL over HTTP
//!
//! Thin axum layer over [`ServerHost::handle`]: it decodes the request body,
//! runs the document in a fresh context and encodes the response.

use crate::server::host::ServerHost;
use axum::{
    Json, Router,
    extract::Extension,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQLRequestBody {
    query: String,
    #[serde(default)]
    variables: Option<HashMap<String, Value>>,
    #[serde(default)]
    operation_name: Option<String>,
}

/// GraphQL API exposure
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host
    ///
    /// Routes, relative to the configured `graphql_path`:
    /// - `POST {path}`: execute a query or mutation
    /// - `GET {path}/schema`: the SDL document
    pub fn build_router(host: Arc<ServerHost>) -> Router {
        let path = host.config.server.graphql_path.clone();
        let schema_path = format!("{}/schema", path.trim_end_matches('/'));

        Router::new()
            .route(&path, post(graphql_handler))
            .route(&schema_path, get(graphql_schema))
            .layer(Extension(host))
            .layer(TraceLayer::new_for_http())
    }
}

/// Handler for GraphQL queries and mutations
async fn graphql_handler(
    Extension(host): Extension<Arc<ServerHost>>,
    Json(request): Json<GraphQLRequestBody>,
) -> impl IntoResponse {
    let result = host
        .handle(
            &request.query,
            request.operation_name.as_deref(),
            request.variables.unwrap_or_default(),
        )
        .await;

    match result {
        Ok(response) => (StatusCode::OK, Json(response.to_json())),
        Err(e) => (e.status_code(), Json(e.to_response_json())),
    }
}

/// Handler for SDL export
async fn graphql_schema(Extension(host): Extension<Arc<ServerHost>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        host.schema().sdl().to_string(),
    )
}
