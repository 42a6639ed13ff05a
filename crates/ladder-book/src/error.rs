//! Error types for ladder-book.

use ladder_core::CoreError;
use thiserror::Error;

/// Aggregation errors: only codec failures on malformed raw orders.
#[derive(Debug, Error)]
pub enum BookError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for aggregation.
pub type BookResult<T> = std::result::Result<T, BookError>;
