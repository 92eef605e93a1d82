//! Like status loader
//!
//! Batches "what did this viewer vote on this quote" lookups for a page of
//! quotes into a single query against the likes table.

use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::batch::{BatchFetch, BatchLoader, LoadError};
use crate::models::{BatchKey, Like, Viewer};

/// Per-request loader for like rows
pub type LikeStatusResolver = BatchLoader<LikeStatusFetch>;

/// Fetches like rows for a set of (quote, user) pairs
#[derive(Clone)]
pub struct LikeStatusFetch {
    pool: PgPool,
}

impl LikeStatusFetch {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BatchFetch for LikeStatusFetch {
    type Key = BatchKey;
    type Value = Like;

    async fn fetch(&self, keys: &[BatchKey]) -> Result<Vec<Option<Like>>, LoadError> {
        let (user_ids, quote_ids): (Vec<Uuid>, Vec<i32>) =
            keys.iter().map(|k| (k.user_id, k.quote_id)).unzip();

        let likes: Vec<Like> = sqlx::query_as(
            r#"
            SELECT l.user_id, l.quote_id, l.value
            FROM likes l
            INNER JOIN UNNEST($1::uuid[], $2::int[]) AS k(user_id, quote_id)
                ON l.user_id = k.user_id AND l.quote_id = k.quote_id
            "#,
        )
        .bind(&user_ids)
        .bind(&quote_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_key: HashMap<BatchKey, Like> =
            likes.into_iter().map(|like| (like.key(), like)).collect();

        Ok(keys.iter().map(|key| by_key.remove(key)).collect())
    }
}

/// Resolve the `likeStatus` field of a quote for the current viewer
///
/// `None` for anonymous viewers, `Some(1)` only when the viewer's vote is an
/// upvote. Downvotes are stored but never reported back.
pub async fn like_status<F>(
    loader: &BatchLoader<F>,
    quote_id: i32,
    viewer: Viewer,
) -> Result<Option<i32>, LoadError>
where
    F: BatchFetch<Key = BatchKey, Value = Like>,
{
    let Some(user_id) = viewer.id() else {
        return Ok(None);
    };

    let like = loader.load(BatchKey::new(quote_id, user_id)).await?;
    Ok(like.filter(|like| like.value == 1).map(|_| 1))
}
