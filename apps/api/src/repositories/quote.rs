//! Quote repository for read-side database operations
//!
//! Writes to quotes happen only through the toggle engine, which keeps
//! `like_count` in step with the likes table.

use sqlx::PgPool;
use uuid::Uuid;

use super::utils::{QUOTE_COLUMNS, QUOTE_COLUMNS_Q};
use crate::graphql::pagination::{Page, PageRequest};
use crate::models::{Quote, QuoteFilter};

/// Repository for quote database operations
#[derive(Clone)]
pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    /// Create a new QuoteRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a quote by its id
    pub async fn find_by_id(&self, quote_id: i32) -> Result<Option<Quote>, sqlx::Error> {
        let sql = format!("SELECT {} FROM quotes WHERE id = $1", QUOTE_COLUMNS);
        sqlx::query_as::<_, Quote>(&sql)
            .bind(quote_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Fetch one keyset page, oldest first
    ///
    /// Ids come from a sequence, so id order is creation order. The sort key
    /// and the cursor filter must both be the id: `created_at` is taken at
    /// transaction start and can run backwards relative to id across
    /// concurrent inserts.
    ///
    /// Asks for one row more than the page size so the page knows whether
    /// another one follows.
    #[tracing::instrument(skip(self))]
    pub async fn find_page(&self, request: &PageRequest) -> Result<Page<Quote>, sqlx::Error> {
        let sql = format!(
            r#"SELECT {} FROM quotes
            WHERE ($1::int IS NULL OR id > $1)
            ORDER BY id ASC
            LIMIT $2"#,
            QUOTE_COLUMNS
        );
        let rows = sqlx::query_as::<_, Quote>(&sql)
            .bind(request.cursor())
            .bind(request.fetch_limit())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::from_overfetch(rows, request))
    }

    /// Find quotes whose author, country, job or category matches exactly
    pub async fn find_by_filter(&self, filter: &QuoteFilter) -> Result<Vec<Quote>, sqlx::Error> {
        // column() only yields fixed names, never user input
        let sql = format!(
            "SELECT {} FROM quotes WHERE {} = $1 ORDER BY id ASC",
            QUOTE_COLUMNS,
            filter.column()
        );
        sqlx::query_as::<_, Quote>(&sql)
            .bind(filter.value())
            .fetch_all(&self.pool)
            .await
    }

    /// Most liked quotes first
    pub async fn find_top(&self, limit: i64) -> Result<Vec<Quote>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM quotes ORDER BY like_count DESC, id ASC LIMIT $1",
            QUOTE_COLUMNS
        );
        sqlx::query_as::<_, Quote>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    /// Quotes a user has marked as favorite, most recently favorited first
    pub async fn find_favorites(&self, user_id: Uuid) -> Result<Vec<Quote>, sqlx::Error> {
        let sql = format!(
            r#"SELECT {} FROM quotes q
            INNER JOIN favorites f ON f.quote_id = q.id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC, q.id ASC"#,
            QUOTE_COLUMNS_Q
        );
        sqlx::query_as::<_, Quote>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }
}
