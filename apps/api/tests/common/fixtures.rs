//! Row fixtures for integration tests

use sqlx::PgPool;
use uuid::Uuid;

/// Insert a quote with a unique author and return its id
pub async fn insert_quote(pool: &PgPool) -> i32 {
    insert_quote_by(pool, &format!("Author {}", Uuid::new_v4())).await
}

/// Insert a quote attributed to `author` and return its id
pub async fn insert_quote_by(pool: &PgPool, author: &str) -> i32 {
    sqlx::query_scalar(
        r#"
        INSERT INTO quotes (author, country, job, category, text)
        VALUES ($1, 'Nowhere', 'Tester', 'testing', 'A quote written by a test')
        RETURNING id
        "#,
    )
    .bind(author)
    .fetch_one(pool)
    .await
    .expect("quote insert should succeed")
}

/// Current `like_count` of a quote
pub async fn like_count(pool: &PgPool, quote_id: i32) -> i32 {
    sqlx::query_scalar("SELECT like_count FROM quotes WHERE id = $1")
        .bind(quote_id)
        .fetch_one(pool)
        .await
        .expect("quote should exist")
}

/// Sum of like values recorded for a quote
pub async fn like_sum(pool: &PgPool, quote_id: i32) -> i64 {
    sqlx::query_scalar("SELECT COALESCE(SUM(value), 0)::bigint FROM likes WHERE quote_id = $1")
        .bind(quote_id)
        .fetch_one(pool)
        .await
        .expect("sum query should succeed")
}

/// The stored like value for a user and quote
pub async fn like_value(pool: &PgPool, user_id: Uuid, quote_id: i32) -> Option<i32> {
    sqlx::query_scalar("SELECT value FROM likes WHERE user_id = $1 AND quote_id = $2")
        .bind(user_id)
        .bind(quote_id)
        .fetch_optional(pool)
        .await
        .expect("like query should succeed")
}

/// Insert a favorite row directly
pub async fn insert_favorite(pool: &PgPool, user_id: Uuid, quote_id: i32) {
    sqlx::query("INSERT INTO favorites (user_id, quote_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(quote_id)
        .execute(pool)
        .await
        .expect("favorite insert should succeed");
}
