//! Viewer guard for GraphQL mutations

use async_graphql::{Context, Guard};
use tracing::debug;

use crate::error::ApiError;
use crate::graphql::context::viewer;

/// Rejects the field with `UNAUTHORIZED` when the request has no viewer
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewerGuard;

impl Guard for ViewerGuard {
    async fn check(&self, ctx: &Context<'_>) -> async_graphql::Result<()> {
        if viewer(ctx).id().is_some() {
            return Ok(());
        }

        debug!("Anonymous request rejected by viewer guard");
        Err(ApiError::Unauthorized.into_graphql())
    }
}
