//! Vote and favorite toggles
//!
//! Every operation here changes a detail row (likes or favorites) and, for
//! votes, the quote's `like_count` aggregate. Both happen in one transaction
//! that starts by locking the quote row:
//!
//! - votes take `FOR NO KEY UPDATE`, so votes on the same quote run one after
//!   another while votes on different quotes never wait for each other
//! - favorites take `FOR KEY SHARE`, which only guarantees the quote exists
//!   and does not queue behind votes
//!
//! Nothing is retried here. A failed commit leaves the outcome unknown to
//! us, and replaying a vote blindly could apply it twice.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{VoteDirection, VoteTransition};

/// Applies votes and favorite toggles transactionally
#[derive(Clone)]
pub struct ToggleEngine {
    pool: PgPool,
}

impl ToggleEngine {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record `user_id`'s vote on a quote
    ///
    /// Inserting a vote adds its value to `like_count`, switching to the
    /// opposite vote adds twice the new value, repeating the current vote
    /// changes nothing. Returns `true` once the change is committed.
    #[tracing::instrument(skip(self))]
    pub async fn apply_vote(
        &self,
        user_id: Uuid,
        quote_id: i32,
        direction: VoteDirection,
    ) -> ApiResult<bool> {
        let mut tx = self.pool.begin().await?;

        lock_quote(&mut tx, quote_id, RowLock::NoKeyUpdate).await?;

        let current: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT value FROM likes
            WHERE user_id = $1 AND quote_id = $2
            "#,
        )
        .bind(user_id)
        .bind(quote_id)
        .fetch_optional(&mut *tx)
        .await?;

        let transition = VoteTransition::plan(current, direction);
        match transition {
            VoteTransition::Unchanged => {
                tracing::debug!("Vote unchanged");
                return Ok(true);
            }
            VoteTransition::Insert { value } => {
                sqlx::query(
                    r#"
                    INSERT INTO likes (user_id, quote_id, value)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(user_id)
                .bind(quote_id)
                .bind(value)
                .execute(&mut *tx)
                .await?;
            }
            VoteTransition::Flip { value } => {
                sqlx::query(
                    r#"
                    UPDATE likes SET value = $3
                    WHERE user_id = $1 AND quote_id = $2
                    "#,
                )
                .bind(user_id)
                .bind(quote_id)
                .bind(value)
                .execute(&mut *tx)
                .await?;
            }
        }

        adjust_like_count(&mut tx, quote_id, transition.like_count_delta()).await?;
        tx.commit().await?;

        tracing::info!(?transition, "Vote applied");
        Ok(true)
    }

    /// Remove `user_id`'s vote on a quote, if any
    ///
    /// Returns whether a vote was removed.
    #[tracing::instrument(skip(self))]
    pub async fn clear_vote(&self, user_id: Uuid, quote_id: i32) -> ApiResult<bool> {
        let mut tx = self.pool.begin().await?;

        lock_quote(&mut tx, quote_id, RowLock::NoKeyUpdate).await?;

        let removed: Option<i32> = sqlx::query_scalar(
            r#"
            DELETE FROM likes
            WHERE user_id = $1 AND quote_id = $2
            RETURNING value
            "#,
        )
        .bind(user_id)
        .bind(quote_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(value) = removed else {
            tracing::debug!("No vote to clear");
            return Ok(false);
        };

        adjust_like_count(&mut tx, quote_id, -value).await?;
        tx.commit().await?;

        tracing::info!(value, "Vote cleared");
        Ok(true)
    }

    /// Add the quote to the user's favorites, or remove it if already there
    ///
    /// Returns whether the quote is a favorite afterwards.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_favorite(&self, user_id: Uuid, quote_id: i32) -> ApiResult<bool> {
        let mut tx = self.pool.begin().await?;

        lock_quote(&mut tx, quote_id, RowLock::KeyShare).await?;

        let removed = sqlx::query(
            r#"
            DELETE FROM favorites
            WHERE user_id = $1 AND quote_id = $2
            "#,
        )
        .bind(user_id)
        .bind(quote_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if removed == 0 {
            sqlx::query(
                r#"
                INSERT INTO favorites (user_id, quote_id, created_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (user_id, quote_id) DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(quote_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let favorited = removed == 0;
        tracing::info!(favorited, "Favorite toggled");
        Ok(favorited)
    }
}

#[derive(Debug, Clone, Copy)]
enum RowLock {
    NoKeyUpdate,
    KeyShare,
}

impl RowLock {
    fn clause(self) -> &'static str {
        match self {
            Self::NoKeyUpdate => "FOR NO KEY UPDATE",
            Self::KeyShare => "FOR KEY SHARE",
        }
    }
}

/// Lock the quote row for the rest of the transaction
async fn lock_quote(conn: &mut PgConnection, quote_id: i32, lock: RowLock) -> ApiResult<()> {
    let sql = format!("SELECT id FROM quotes WHERE id = $1 {}", lock.clause());
    let found: Option<i32> = sqlx::query_scalar(&sql)
        .bind(quote_id)
        .fetch_optional(&mut *conn)
        .await?;

    found
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found("quote", quote_id))
}

async fn adjust_like_count(conn: &mut PgConnection, quote_id: i32, delta: i32) -> ApiResult<()> {
    sqlx::query(
        r#"
        UPDATE quotes
        SET like_count = like_count + $1
        WHERE id = $2
        "#,
    )
    .bind(delta)
    .bind(quote_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
