//! Like and favorite models
//!
//! A like row carries a vote value of `1` or `-1`; a missing row means the
//! user has no opinion on the quote. A favorite row carries no value, its
//! presence is the whole signal.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;

/// Identifies one viewer's relationship to one quote
///
/// Used as the lookup and memoization key of the status loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchKey {
    pub quote_id: i32,
    pub user_id: Uuid,
}

impl BatchKey {
    pub fn new(quote_id: i32, user_id: Uuid) -> Self {
        Self { quote_id, user_id }
    }
}

/// Like record from the likes table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Like {
    pub user_id: Uuid,
    pub quote_id: i32,
    /// Either 1 or -1
    pub value: i32,
}

impl Like {
    pub fn key(&self) -> BatchKey {
        BatchKey::new(self.quote_id, self.user_id)
    }
}

/// Favorite record from the favorites table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub user_id: Uuid,
    pub quote_id: i32,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn key(&self) -> BatchKey {
        BatchKey::new(self.quote_id, self.user_id)
    }
}

/// A validated vote direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// The value stored in the like row
    pub fn value(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

impl TryFrom<i32> for VoteDirection {
    type Error = ApiError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(ApiError::validation(format!(
                "vote value must be 1 or -1, got {}",
                other
            ))),
        }
    }
}

/// What applying a vote does to the like row and the quote's like count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No row yet: insert one with `value`
    Insert { value: i32 },
    /// Row holds the opposite vote: rewrite it to `value`
    Flip { value: i32 },
    /// Row already holds the requested vote
    Unchanged,
}

impl VoteTransition {
    /// Decide the transition from the current row value
    pub fn plan(current: Option<i32>, requested: VoteDirection) -> Self {
        let value = requested.value();
        match current {
            None => Self::Insert { value },
            Some(existing) if existing == value => Self::Unchanged,
            Some(_) => Self::Flip { value },
        }
    }

    /// Amount to add to `quotes.like_count`
    ///
    /// A flip removes the old vote and adds the new one, hence twice the value.
    pub fn like_count_delta(self) -> i32 {
        match self {
            Self::Insert { value } => value,
            Self::Flip { value } => 2 * value,
            Self::Unchanged => 0,
        }
    }
}
