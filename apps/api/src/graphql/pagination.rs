//! Pagination helpers for GraphQL resolvers
//!
//! Quotes are paged forward by keyset on their id: the client hands back the
//! id of the last quote it received and the next page starts after it. Rows
//! committed before a page was read are never repeated or skipped. A row
//! whose insert was still in flight while a page was read can land behind
//! that page's cursor and is not seen by the rest of the walk.

use crate::error::{ApiError, ApiResult};

/// Maximum items per page for quote listings
pub const MAX_PAGE_SIZE: i32 = 50;

/// Default number of quotes for the top quotes query
pub const DEFAULT_TOP_LIMIT: i32 = 10;

/// Clamp pagination limit to valid range
#[inline]
pub fn clamp_limit(limit: i32, max: i32) -> i64 {
    limit.clamp(1, max) as i64
}

/// A validated request for one page of quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: i64,
    cursor: Option<i32>,
}

impl PageRequest {
    /// Clamp `limit` to `1..=MAX_PAGE_SIZE` and parse the cursor
    ///
    /// An empty cursor means the first page. Anything that is not a
    /// non-negative quote id is rejected before the store is touched.
    pub fn new(limit: i32, cursor: Option<&str>) -> ApiResult<Self> {
        let cursor = match cursor.map(str::trim).filter(|c| !c.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<i32>() {
                Ok(id) if id >= 0 => Some(id),
                _ => {
                    return Err(ApiError::validation(format!(
                        "invalid cursor '{}': expected a quote id",
                        raw
                    )))
                }
            },
        };

        Ok(Self {
            limit: clamp_limit(limit, MAX_PAGE_SIZE),
            cursor,
        })
    }

    /// Page size after clamping
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Id of the last quote of the previous page
    pub fn cursor(&self) -> Option<i32> {
        self.cursor
    }

    /// Rows to ask the store for: one extra to learn whether more exist
    pub fn fetch_limit(&self) -> i64 {
        self.limit + 1
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with [`PageRequest::fetch_limit`]
    pub fn from_overfetch(mut rows: Vec<T>, request: &PageRequest) -> Self {
        let limit = request.limit() as usize;
        let has_more = rows.len() > limit;
        rows.truncate(limit);
        Self {
            items: rows,
            has_more,
        }
    }

    /// Cursor for the following page, if there is one
    pub fn next_cursor(&self, id_of: impl Fn(&T) -> i32) -> Option<String> {
        if !self.has_more {
            return None;
        }
        self.items.last().map(|item| id_of(item).to_string())
    }
}
