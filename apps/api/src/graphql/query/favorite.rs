//! Favorite queries for Quotebook GraphQL API

use async_graphql::{Context, Object, Result};

use crate::error::ApiError;
use crate::graphql::context::viewer;
use crate::graphql::guards::ViewerGuard;
use crate::graphql::types::Quote;
use crate::repositories::QuoteRepository;

/// Queries over the viewer's favorites
#[derive(Default)]
pub struct FavoriteQuery;

#[Object]
impl FavoriteQuery {
    /// The viewer's favorite quotes, most recently favorited first
    #[graphql(guard = "ViewerGuard")]
    async fn favorite_quotes(&self, ctx: &Context<'_>) -> Result<Vec<Quote>> {
        let user_id = viewer(ctx).require().map_err(ApiError::into_graphql)?;
        let repo = ctx.data::<QuoteRepository>()?;

        let quotes = repo
            .find_favorites(user_id)
            .await
            .map_err(|e| ApiError::from(e).into_graphql())?;

        Ok(quotes.into_iter().map(Quote::from).collect())
    }
}
