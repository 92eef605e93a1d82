//! Quote queries for Quotebook GraphQL API
//!
//! - quotes: Keyset-paginated listing, oldest first
//! - quote: A single quote by id
//! - quotesBy: Exact match on author, country, job or category
//! - topQuotes: Most liked quotes

use async_graphql::{Context, Object, Result};

use crate::error::ApiError;
use crate::graphql::pagination::{clamp_limit, PageRequest, DEFAULT_TOP_LIMIT, MAX_PAGE_SIZE};
use crate::graphql::types::{PaginatedQuotes, Quote};
use crate::models::QuoteFilter;
use crate::repositories::QuoteRepository;

/// Quote read queries
#[derive(Default)]
pub struct QuoteQuery;

#[Object]
impl QuoteQuery {
    /// One page of quotes
    ///
    /// `limit` is clamped to 1..=50. Pass the previous page's `nextCursor`
    /// as `cursor` to continue.
    async fn quotes(
        &self,
        ctx: &Context<'_>,
        limit: i32,
        cursor: Option<String>,
    ) -> Result<PaginatedQuotes> {
        let request = PageRequest::new(limit, cursor.as_deref()).map_err(ApiError::into_graphql)?;
        let repo = ctx.data::<QuoteRepository>()?;

        let page = repo
            .find_page(&request)
            .await
            .map_err(|e| ApiError::from(e).into_graphql())?;

        Ok(page.into())
    }

    /// A single quote, or null if it does not exist
    async fn quote(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Quote>> {
        let repo = ctx.data::<QuoteRepository>()?;

        let quote = repo
            .find_by_id(id)
            .await
            .map_err(|e| ApiError::from(e).into_graphql())?;

        Ok(quote.map(Quote::from))
    }

    /// Quotes matching one attribute exactly
    ///
    /// Only the first non-empty argument is used, in the order author,
    /// country, job, category. At least one is required.
    async fn quotes_by(
        &self,
        ctx: &Context<'_>,
        author: Option<String>,
        country: Option<String>,
        job: Option<String>,
        category: Option<String>,
    ) -> Result<Vec<Quote>> {
        let filter = QuoteFilter::first_of(author, country, job, category).ok_or_else(|| {
            ApiError::validation("one of author, country, job or category is required")
                .into_graphql()
        })?;
        let repo = ctx.data::<QuoteRepository>()?;

        let quotes = repo
            .find_by_filter(&filter)
            .await
            .map_err(|e| ApiError::from(e).into_graphql())?;

        Ok(quotes.into_iter().map(Quote::from).collect())
    }

    /// Most liked quotes first
    async fn top_quotes(
        &self,
        ctx: &Context<'_>,
        #[graphql(default_with = "DEFAULT_TOP_LIMIT")] limit: i32,
    ) -> Result<Vec<Quote>> {
        let repo = ctx.data::<QuoteRepository>()?;

        let quotes = repo
            .find_top(clamp_limit(limit, MAX_PAGE_SIZE))
            .await
            .map_err(|e| ApiError::from(e).into_graphql())?;

        Ok(quotes.into_iter().map(Quote::from).collect())
    }
}
