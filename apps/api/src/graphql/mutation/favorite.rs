//! Favorite mutations for Quotebook GraphQL API

use async_graphql::{Context, Object, Result};

use crate::error::ApiError;
use crate::graphql::context::viewer;
use crate::graphql::guards::ViewerGuard;
use crate::repositories::ToggleEngine;

/// Favorite mutations
#[derive(Default)]
pub struct FavoriteMutation;

#[Object]
impl FavoriteMutation {
    /// Add a quote to the viewer's favorites, or remove it if present
    ///
    /// Returns whether the quote is a favorite afterwards.
    #[graphql(guard = "ViewerGuard")]
    async fn toggle_favorite(&self, ctx: &Context<'_>, quote_id: i32) -> Result<bool> {
        let user_id = viewer(ctx).require().map_err(ApiError::into_graphql)?;
        let engine = ctx.data::<ToggleEngine>()?;

        engine
            .toggle_favorite(user_id, quote_id)
            .await
            .map_err(ApiError::into_graphql)
    }
}
