//! Error types for ladder-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("tick {0} outside the representable range")]
    InvalidTick(i32),

    #[error("price out of range: {0}")]
    PriceOutOfRange(String),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("raw amount overflow: {0}")]
    AmountOverflow(String),

    #[error("unsupported token decimals: {0}")]
    UnsupportedDecimals(u8),

    #[error("base and quote resolve to the same token: {0}")]
    IdenticalTokens(alloy_primitives::Address),
}

/// Result type alias for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
