//! GraphQL queries for Quotebook
//!
//! This module contains all query resolvers, organized by domain.

mod favorite;
mod quote;

pub use favorite::FavoriteQuery;
pub use quote::QuoteQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(QuoteQuery, FavoriteQuery);
