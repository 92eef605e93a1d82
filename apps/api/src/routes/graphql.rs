//! GraphQL HTTP route handlers
//!
//! - `POST /graphql` - Execute a query against the schema
//! - `GET /graphql/playground` - GraphQL Playground for development
//!
//! Each request gets its viewer from the configured trusted header and a
//! fresh set of batch loaders. Neither outlives the request.

use std::sync::Arc;

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{HeaderMap, HeaderName},
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;

use crate::graphql::{QuotebookSchema, RequestLoaders};
use crate::models::Viewer;

/// Shared state for the GraphQL handlers
#[derive(Clone)]
pub struct GraphQLState {
    schema: QuotebookSchema,
    pool: PgPool,
    viewer_header: HeaderName,
}

impl GraphQLState {
    pub fn new(schema: QuotebookSchema, pool: PgPool, viewer_header: HeaderName) -> Self {
        Self {
            schema,
            pool,
            viewer_header,
        }
    }
}

/// Create the GraphQL router
pub fn graphql_router(state: GraphQLState) -> Router {
    Router::new()
        .route("/", post(graphql_handler))
        .route("/playground", get(graphql_playground))
        .with_state(state)
}

/// Read the viewer from the trusted header
///
/// A missing or malformed value yields an anonymous viewer rather than an
/// error; protected fields reject it on their own.
pub fn extract_viewer(headers: &HeaderMap, header: &HeaderName) -> Viewer {
    let value = headers.get(header).and_then(|v| v.to_str().ok());
    let viewer = Viewer::from_header_value(value);

    if value.is_some() && viewer.id().is_none() {
        tracing::debug!(header = %header, "Ignoring malformed viewer header");
    }
    viewer
}

/// Execute a GraphQL request with the viewer and fresh loaders attached
async fn graphql_handler(
    State(state): State<GraphQLState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let viewer = extract_viewer(&headers, &state.viewer_header);

    let request = req
        .into_inner()
        .data(viewer)
        .data(Arc::new(RequestLoaders::new(state.pool.clone())));

    state.schema.execute(request).await.into()
}

/// GraphQL Playground handler for development
async fn graphql_playground() -> impl IntoResponse {
    Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    fn header() -> HeaderName {
        HeaderName::from_static("x-viewer-id")
    }

    #[test]
    fn test_extract_viewer_from_header() {
        let user = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header(),
            HeaderValue::from_str(&user.to_string()).unwrap(),
        );

        assert_eq!(extract_viewer(&headers, &header()), Viewer::user(user));
    }

    #[test]
    fn test_missing_header_is_anonymous() {
        assert_eq!(
            extract_viewer(&HeaderMap::new(), &header()),
            Viewer::anonymous()
        );
    }

    #[test]
    fn test_malformed_header_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(header(), HeaderValue::from_static("not-a-uuid"));

        assert_eq!(extract_viewer(&headers, &header()), Viewer::anonymous());
    }
}
