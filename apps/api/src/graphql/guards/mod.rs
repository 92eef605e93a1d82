//! GraphQL guards for the Quotebook API
//!
//! Guards run before a resolver body. The viewer guard turns away anonymous
//! callers of mutations that act on behalf of a user.

mod viewer;

pub use viewer::ViewerGuard;
