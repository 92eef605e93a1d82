//! Common test utilities for API integration tests
//!
//! Integration tests run against PostgreSQL and skip themselves when no
//! database is reachable. Each test creates its own quotes and users, so
//! tests never depend on each other's rows.

#![allow(dead_code, unused_imports, unused_macros)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;

/// Skip the current test if the database is not available
macro_rules! require_db {
    ($pool_var:ident) => {
        let $pool_var = match crate::common::try_create_test_pool().await {
            Some(p) => p,
            None => {
                eprintln!("Skipping test: database not available");
                return;
            }
        };
    };
}
