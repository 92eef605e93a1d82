//! GraphQL type definitions for Quotebook
//!
//! This module contains the GraphQL object types that are exposed
//! through the API.

mod quote;

pub use quote::{PaginatedQuotes, Quote};
