//! Database repository layer for Quotebook
//!
//! All SQL lives here:
//! - `QuoteRepository` for reading quotes (pages, filters, rankings)
//! - `ToggleEngine` for the transactional vote and favorite writes

pub mod quote;
pub mod toggle;
pub mod utils;

pub use quote::QuoteRepository;
pub use toggle::ToggleEngine;
