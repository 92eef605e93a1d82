//! HTTP route handlers for the Quotebook API
//!
//! - GraphQL endpoint and playground
//! - Health check and readiness endpoints

pub mod graphql;
pub mod health;

pub use graphql::{extract_viewer, graphql_router, GraphQLState};
pub use health::{health_router, HealthState};

use axum::{routing::get, Router};

/// Assemble the application router without transport layers
///
/// CORS and tracing layers are added by the binary.
pub fn app_router(graphql: GraphQLState, health: HealthState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/graphql", graphql_router(graphql))
        .nest("/health", health_router(health))
}

async fn root() -> &'static str {
    "Quotebook API"
}
