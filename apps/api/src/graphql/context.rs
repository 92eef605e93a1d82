//! Accessors for per-request GraphQL context data

use std::sync::Arc;

use async_graphql::Context;

use crate::error::ApiError;
use crate::graphql::loaders::RequestLoaders;
use crate::models::Viewer;

/// The request's viewer; anonymous when the handler attached none
pub fn viewer(ctx: &Context<'_>) -> Viewer {
    ctx.data_opt::<Viewer>().copied().unwrap_or_default()
}

/// The request's loaders
///
/// Stored as `Arc<RequestLoaders>` so whoever attached them can read their
/// batch counts after the request has run. Missing loaders mean the request
/// was built without going through the GraphQL handler, which is a wiring
/// bug rather than a client error.
pub fn loaders<'a>(ctx: &Context<'a>) -> Result<&'a RequestLoaders, async_graphql::Error> {
    ctx.data_opt::<Arc<RequestLoaders>>()
        .map(Arc::as_ref)
        .ok_or_else(|| {
            ApiError::Internal("request loaders missing from GraphQL context".to_string())
                .into_graphql()
        })
}
