//! Quote GraphQL type
//!
//! Plain columns come straight from the row. The viewer-specific fields
//! (`likeStatus`, `hasFavorite`) go through the request's batch loaders so a
//! page of quotes costs one extra query per field, not one per quote.

use async_graphql::{Context, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::graphql::context::{loaders, viewer};
use crate::graphql::loaders::{has_favorite, like_status};
use crate::graphql::pagination::Page;
use crate::models::Quote as DbQuote;

/// A quote exposed via GraphQL
pub struct Quote {
    inner: DbQuote,
}

impl Quote {
    /// Create a new GraphQL Quote from a database Quote
    pub fn new(quote: DbQuote) -> Self {
        Self { inner: quote }
    }
}

impl From<DbQuote> for Quote {
    fn from(quote: DbQuote) -> Self {
        Self::new(quote)
    }
}

#[Object]
impl Quote {
    /// Unique quote identifier
    async fn id(&self) -> i32 {
        self.inner.id
    }

    /// Person the quote is attributed to
    async fn author(&self) -> &str {
        &self.inner.author
    }

    /// Author's country
    async fn country(&self) -> &str {
        &self.inner.country
    }

    /// Author's occupation
    async fn job(&self) -> &str {
        &self.inner.job
    }

    /// Category the quote is listed under
    async fn category(&self) -> &str {
        &self.inner.category
    }

    /// The quote text
    async fn text(&self) -> &str {
        &self.inner.text
    }

    /// Upvotes minus downvotes
    async fn like_count(&self) -> i32 {
        self.inner.like_count
    }

    /// Creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// 1 if the viewer upvoted this quote, null otherwise (including for
    /// anonymous viewers and downvotes)
    async fn like_status(&self, ctx: &Context<'_>) -> Result<Option<i32>> {
        let viewer = viewer(ctx);
        if viewer.id().is_none() {
            return Ok(None);
        }

        let loaders = loaders(ctx)?;
        like_status(&loaders.likes, self.inner.id, viewer)
            .await
            .map_err(|e| ApiError::from(e).into_graphql())
    }

    /// Whether the viewer favorited this quote, null for anonymous viewers
    async fn has_favorite(&self, ctx: &Context<'_>) -> Result<Option<bool>> {
        let viewer = viewer(ctx);
        if viewer.id().is_none() {
            return Ok(None);
        }

        let loaders = loaders(ctx)?;
        has_favorite(&loaders.favorites, self.inner.id, viewer)
            .await
            .map_err(|e| ApiError::from(e).into_graphql())
    }
}

/// One page of quotes
#[derive(SimpleObject)]
pub struct PaginatedQuotes {
    /// Quotes on this page, oldest first
    pub quotes: Vec<Quote>,
    /// Whether another page follows
    pub has_more: bool,
    /// Cursor to request the next page with, null on the last page
    pub next_cursor: Option<String>,
}

impl From<Page<DbQuote>> for PaginatedQuotes {
    fn from(page: Page<DbQuote>) -> Self {
        let next_cursor = page.next_cursor(|quote| quote.id);
        Self {
            quotes: page.items.into_iter().map(Quote::from).collect(),
            has_more: page.has_more,
            next_cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{EmptyMutation, EmptySubscription, Request, Schema};
    use serde_json::json;
    use uuid::Uuid;

    use crate::models::Viewer;

    struct OneQuote;

    #[Object]
    impl OneQuote {
        async fn quote(&self) -> Quote {
            Quote::new(DbQuote {
                id: 7,
                author: "Ada Lovelace".to_string(),
                country: "England".to_string(),
                job: "Mathematician".to_string(),
                category: "science".to_string(),
                text: "That brain of mine is something more than merely mortal".to_string(),
                like_count: 3,
                created_at: Utc::now(),
            })
        }
    }

    fn schema() -> Schema<OneQuote, EmptyMutation, EmptySubscription> {
        Schema::new(OneQuote, EmptyMutation, EmptySubscription)
    }

    #[tokio::test]
    async fn test_anonymous_status_needs_no_loaders() {
        let request = Request::new("{ quote { id likeStatus hasFavorite } }")
            .data(Viewer::anonymous());

        let response = schema().execute(request).await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({ "quote": { "id": 7, "likeStatus": null, "hasFavorite": null } })
        );
    }

    #[tokio::test]
    async fn test_viewer_status_without_loaders_is_internal_error() {
        let request =
            Request::new("{ quote { likeStatus } }").data(Viewer::user(Uuid::new_v4()));

        let response = schema().execute(request).await;

        let error = serde_json::to_value(&response.errors[0]).unwrap();
        assert_eq!(error["extensions"]["code"], "INTERNAL_ERROR");
        assert_eq!(error["message"], "An unexpected error occurred");
    }
}
