//! Database models and types for Quotebook
//!
//! This module contains SQLx models for:
//! - Quotes and their lookup filters
//! - Likes, favorites and the vote state machine
//! - The per-request viewer identity

pub mod quote;
pub mod viewer;
pub mod vote;

pub use quote::{Quote, QuoteFilter};
pub use viewer::Viewer;
pub use vote::{BatchKey, Favorite, Like, VoteDirection, VoteTransition};
