//! Favorite status loader

use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::batch::{BatchFetch, BatchLoader, LoadError};
use crate::models::{BatchKey, Favorite, Viewer};

/// Per-request loader for favorite rows
pub type FavoriteStatusResolver = BatchLoader<FavoriteStatusFetch>;

/// Fetches favorite rows for a set of (quote, user) pairs
#[derive(Clone)]
pub struct FavoriteStatusFetch {
    pool: PgPool,
}

impl FavoriteStatusFetch {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BatchFetch for FavoriteStatusFetch {
    type Key = BatchKey;
    type Value = Favorite;

    async fn fetch(&self, keys: &[BatchKey]) -> Result<Vec<Option<Favorite>>, LoadError> {
        let (user_ids, quote_ids): (Vec<Uuid>, Vec<i32>) =
            keys.iter().map(|k| (k.user_id, k.quote_id)).unzip();

        let favorites: Vec<Favorite> = sqlx::query_as(
            r#"
            SELECT f.user_id, f.quote_id, f.created_at
            FROM favorites f
            INNER JOIN UNNEST($1::uuid[], $2::int[]) AS k(user_id, quote_id)
                ON f.user_id = k.user_id AND f.quote_id = k.quote_id
            "#,
        )
        .bind(&user_ids)
        .bind(&quote_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_key: HashMap<BatchKey, Favorite> = favorites
            .into_iter()
            .map(|favorite| (favorite.key(), favorite))
            .collect();

        Ok(keys.iter().map(|key| by_key.remove(key)).collect())
    }
}

/// Resolve the `hasFavorite` field of a quote for the current viewer
///
/// `None` for anonymous viewers, otherwise whether a favorite row exists.
pub async fn has_favorite<F>(
    loader: &BatchLoader<F>,
    quote_id: i32,
    viewer: Viewer,
) -> Result<Option<bool>, LoadError>
where
    F: BatchFetch<Key = BatchKey, Value = Favorite>,
{
    let Some(user_id) = viewer.id() else {
        return Ok(None);
    };

    let favorite = loader.load(BatchKey::new(quote_id, user_id)).await?;
    Ok(Some(favorite.is_some()))
}
