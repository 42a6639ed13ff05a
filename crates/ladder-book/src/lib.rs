//! Order book aggregation.
//!
//! Collapses raw resting orders into display-ready price levels: grouped
//! by displayed price, capped to the levels nearest the inside, with
//! cumulative depth and the user's own resting orders cross-referenced
//! onto matching levels. Pure and synchronous.

pub mod aggregate;
pub mod error;

pub use aggregate::{aggregate_book, own_orders, AggregatedBook, BookLevel, MAX_BOOK_LEVELS};
pub use error::{BookError, BookResult};
