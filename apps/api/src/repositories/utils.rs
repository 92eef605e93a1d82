//! Shared SQL fragments for repositories

/// SQL columns for quote queries
pub const QUOTE_COLUMNS: &str = r#"
    id, author, country, job, category, text,
    like_count, created_at
"#;

/// SQL columns for quote queries joined under the `q` alias
pub const QUOTE_COLUMNS_Q: &str = r#"
    q.id, q.author, q.country, q.job, q.category, q.text,
    q.like_count, q.created_at
"#;
