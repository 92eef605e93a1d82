//! GraphQL schema and resolvers for Quotebook
//!
//! This module contains the async-graphql schema including:
//! - Query and mutation resolvers for quotes, votes and favorites
//! - Per-request batch loaders for viewer-specific fields
//! - Guards and context accessors for the viewer

pub mod context;
pub mod guards;
pub mod loaders;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod types;

pub use loaders::RequestLoaders;
pub use schema::{build_schema, QuotebookSchema, SchemaBuilder};
