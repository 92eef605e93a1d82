//! Per-request loaders for viewer-specific quote fields
//!
//! Resolving `likeStatus` or `hasFavorite` on a page of quotes would
//! otherwise cost one query per quote. These loaders collect the lookups of
//! one resolution pass and answer them with a single query each.
//!
//! A fresh [`RequestLoaders`] is attached to every GraphQL request and
//! dropped with it. Nothing is cached across requests.

mod favorite_status;
mod like_status;

pub use favorite_status::{has_favorite, FavoriteStatusFetch, FavoriteStatusResolver};
pub use like_status::{like_status, LikeStatusFetch, LikeStatusResolver};

use sqlx::PgPool;

/// The loaders owned by one GraphQL request
pub struct RequestLoaders {
    pub likes: LikeStatusResolver,
    pub favorites: FavoriteStatusResolver,
}

impl RequestLoaders {
    /// Create empty loaders for a new request
    pub fn new(pool: PgPool) -> Self {
        Self {
            likes: LikeStatusResolver::new(LikeStatusFetch::new(pool.clone())),
            favorites: FavoriteStatusResolver::new(FavoriteStatusFetch::new(pool)),
        }
    }
}
