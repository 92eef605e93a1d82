//! Integration tests for keyset pagination over the quotes table
//!
//! Kept to a single test so no other test in this binary inserts quotes
//! between the pages it reads.

#[macro_use]
mod common;

use common::*;
use quotebook_api::graphql::pagination::{PageRequest, MAX_PAGE_SIZE};
use quotebook_api::repositories::QuoteRepository;

#[tokio::test]
async fn test_pages_walk_forward_from_cursor() {
    require_db!(pool);
    let repo = QuoteRepository::new(pool.clone());

    let start: i32 = sqlx::query_scalar("SELECT COALESCE(MAX(id), 0) FROM quotes")
        .fetch_one(&pool)
        .await
        .unwrap();
    let first = insert_quote(&pool).await;
    let second = insert_quote(&pool).await;
    let third = insert_quote(&pool).await;

    let start_cursor = start.to_string();
    let request = PageRequest::new(2, Some(&start_cursor)).unwrap();
    let page = repo.find_page(&request).await.unwrap();

    let ids: Vec<i32> = page.items.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![first, second]);
    assert!(page.has_more);

    let cursor = page.next_cursor(|q| q.id).unwrap();
    assert_eq!(cursor, second.to_string());

    let request = PageRequest::new(2, Some(&cursor)).unwrap();
    let page = repo.find_page(&request).await.unwrap();

    let ids: Vec<i32> = page.items.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![third]);
    assert!(!page.has_more);
    assert_eq!(page.next_cursor(|q| q.id), None);

    // Oversized pages are clamped
    for _ in 0..MAX_PAGE_SIZE {
        insert_quote(&pool).await;
    }
    let request = PageRequest::new(100, Some(&start_cursor)).unwrap();
    let page = repo.find_page(&request).await.unwrap();
    assert_eq!(page.items.len(), MAX_PAGE_SIZE as usize);
    assert!(page.has_more);
}
