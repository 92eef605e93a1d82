//! Request-scoped batched loading
//!
//! A [`BatchLoader`] collects the individual lookups a GraphQL request makes
//! while resolving one level of the response and answers them with a single
//! store query. The store side is supplied as a [`BatchFetch`]
//! implementation. Loaders are created per request and never shared, so
//! viewer-specific rows cannot leak between requests.

mod loader;

pub use loader::BatchLoader;

use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use thiserror::Error;

/// Failure of one dispatched batch
///
/// Every waiter of a batch receives a clone of the same error, which is why
/// the database error sits behind an `Arc`.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
    /// The batch query failed
    #[error("database error: {0}")]
    Database(Arc<sqlx::Error>),

    /// The fetch returned a different number of values than it was given keys
    #[error("batch fetch returned {actual} values for {expected} keys")]
    BatchAlignment { expected: usize, actual: usize },

    /// The task running the fetch ended without reporting a result
    #[error("batch was abandoned before completing")]
    Abandoned,
}

impl From<sqlx::Error> for LoadError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(Arc::new(err))
    }
}

/// The store query behind a [`BatchLoader`]
///
/// `fetch` receives distinct keys and must return one entry per key, in the
/// same order: `values[i]` answers `keys[i]`, with `None` for keys that have
/// no matching row.
pub trait BatchFetch: Send + Sync + 'static {
    type Key: Clone + Eq + Hash + Debug + Send + Sync + 'static;
    type Value: Clone + Send + Sync + 'static;

    fn fetch(
        &self,
        keys: &[Self::Key],
    ) -> impl Future<Output = Result<Vec<Option<Self::Value>>, LoadError>> + Send;
}
