//! GraphQL mutations for Quotebook
//!
//! This module contains all mutation resolvers, organized by domain.

mod favorite;
mod vote;

pub use favorite::FavoriteMutation;
pub use vote::VoteMutation;

use async_graphql::MergedObject;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(VoteMutation, FavoriteMutation);
