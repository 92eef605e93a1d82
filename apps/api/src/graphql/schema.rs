//! GraphQL schema builder for Quotebook
//!
//! This module provides the schema construction for the async-graphql API.

use async_graphql::{EmptySubscription, Schema};
use sqlx::PgPool;

use crate::repositories::{QuoteRepository, ToggleEngine};

use super::mutation::Mutation;
use super::query::Query;

/// The Quotebook GraphQL schema type
pub type QuotebookSchema = Schema<Query, Mutation, EmptySubscription>;

/// Default maximum query depth
pub const DEFAULT_DEPTH_LIMIT: usize = 8;

/// Builder for constructing the GraphQL schema with required services
pub struct SchemaBuilder {
    pool: PgPool,
    depth_limit: usize,
    introspection: bool,
}

impl SchemaBuilder {
    /// Create a new schema builder over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            introspection: true,
        }
    }

    /// Set the maximum query depth
    pub fn depth_limit(mut self, depth: usize) -> Self {
        self.depth_limit = depth;
        self
    }

    /// Enable or disable schema introspection
    pub fn introspection(mut self, enabled: bool) -> Self {
        self.introspection = enabled;
        self
    }

    /// Build the schema with all services attached as schema data
    ///
    /// Per-request data (the viewer and its loaders) is attached by the
    /// HTTP handler, not here.
    pub fn build(self) -> QuotebookSchema {
        let mut builder = Schema::build(Query::default(), Mutation::default(), EmptySubscription)
            .data(QuoteRepository::new(self.pool.clone()))
            .data(ToggleEngine::new(self.pool.clone()))
            .data(self.pool)
            .limit_depth(self.depth_limit);

        if !self.introspection {
            builder = builder.disable_introspection();
        }

        builder.finish()
    }
}

/// Create a new GraphQL schema with default settings
pub fn build_schema(pool: PgPool) -> QuotebookSchema {
    SchemaBuilder::new(pool).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sdl_exposes_quote_surface() {
        // connect_lazy never touches the network until a query runs
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        let sdl = build_schema(pool).sdl();

        assert!(sdl.contains("likeStatus: Int"));
        assert!(sdl.contains("hasFavorite: Boolean"));
        assert!(sdl.contains("likeQuote(quoteId: Int!, value: Int!): Boolean!"));
        assert!(sdl.contains("clearVote(quoteId: Int!): Boolean!"));
        assert!(sdl.contains("toggleFavorite(quoteId: Int!): Boolean!"));
        assert!(sdl.contains("quotes(limit: Int!, cursor: String): PaginatedQuotes!"));
        assert!(sdl.contains("nextCursor: String"));
    }

    #[tokio::test]
    async fn test_builder_defaults() {
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        let builder = SchemaBuilder::new(pool);
        assert_eq!(builder.depth_limit, DEFAULT_DEPTH_LIMIT);
        assert!(builder.introspection);
    }
}
