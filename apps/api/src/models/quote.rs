//! Quote model
//!
//! Quotes are read-mostly rows; the only column the API writes is
//! `like_count`, and only from the toggle engine.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Quote record from the quotes table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    /// Serial identifier, also the pagination cursor
    pub id: i32,

    /// Person the quote is attributed to
    pub author: String,

    /// Author's country
    pub country: String,

    /// Author's occupation
    pub job: String,

    /// Category the quote is listed under
    pub category: String,

    /// The quote itself
    pub text: String,

    /// Sum of all like values for this quote, maintained on every vote
    pub like_count: i32,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Which column `QuoteRepository::find_by_filter` matches on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteFilter {
    Author(String),
    Country(String),
    Job(String),
    Category(String),
}

impl QuoteFilter {
    /// Pick the first non-blank filter in author, country, job, category order
    pub fn first_of(
        author: Option<String>,
        country: Option<String>,
        job: Option<String>,
        category: Option<String>,
    ) -> Option<Self> {
        let present = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        present(author)
            .map(Self::Author)
            .or_else(|| present(country).map(Self::Country))
            .or_else(|| present(job).map(Self::Job))
            .or_else(|| present(category).map(Self::Category))
    }

    pub(crate) fn column(&self) -> &'static str {
        match self {
            Self::Author(_) => "author",
            Self::Country(_) => "country",
            Self::Job(_) => "job",
            Self::Category(_) => "category",
        }
    }

    pub(crate) fn value(&self) -> &str {
        match self {
            Self::Author(v) | Self::Country(v) | Self::Job(v) | Self::Category(v) => v,
        }
    }
}
