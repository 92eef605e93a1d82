//! Vote mutations for Quotebook GraphQL API
//!
//! - likeQuote: Upvote (1) or downvote (-1) a quote
//! - clearVote: Withdraw the viewer's vote on a quote
//!
//! Both require a viewer. The store work happens in [`ToggleEngine`].

use async_graphql::{Context, Object, Result};

use crate::error::ApiError;
use crate::graphql::context::viewer;
use crate::graphql::guards::ViewerGuard;
use crate::models::VoteDirection;
use crate::repositories::ToggleEngine;

/// Vote mutations
#[derive(Default)]
pub struct VoteMutation;

#[Object]
impl VoteMutation {
    /// Vote on a quote
    ///
    /// Repeating the current vote is a no-op; voting the other way replaces
    /// it. Returns true once the vote is stored.
    ///
    /// # Errors
    /// - UNAUTHORIZED without a viewer
    /// - VALIDATION_ERROR if `value` is not 1 or -1
    /// - NOT_FOUND if the quote does not exist
    #[graphql(guard = "ViewerGuard")]
    async fn like_quote(&self, ctx: &Context<'_>, quote_id: i32, value: i32) -> Result<bool> {
        let user_id = viewer(ctx).require().map_err(ApiError::into_graphql)?;
        let direction = VoteDirection::try_from(value).map_err(ApiError::into_graphql)?;
        let engine = ctx.data::<ToggleEngine>()?;

        engine
            .apply_vote(user_id, quote_id, direction)
            .await
            .map_err(ApiError::into_graphql)
    }

    /// Remove the viewer's vote on a quote
    ///
    /// Returns whether there was a vote to remove.
    #[graphql(guard = "ViewerGuard")]
    async fn clear_vote(&self, ctx: &Context<'_>, quote_id: i32) -> Result<bool> {
        let user_id = viewer(ctx).require().map_err(ApiError::into_graphql)?;
        let engine = ctx.data::<ToggleEngine>()?;

        engine
            .clear_vote(user_id, quote_id)
            .await
            .map_err(ApiError::into_graphql)
    }
}
