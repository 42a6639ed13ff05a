//! Error types for ladder-grid.
//!
//! Only malformed input and unusable exchange state are errors here.
//! Density shortfalls are data, carried inside `ValidationResult`.

use ladder_core::{CoreError, Side};
use thiserror::Error;

/// Grid construction and validation errors.
#[derive(Debug, Error)]
pub enum GridError {
    /// Form ordering/step constraints violated. Reported inline next to
    /// the offending field by the caller.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("gasreq {gasreq} exceeds exchange gasmax {gasmax}")]
    GasLimitExceeded { gasreq: u64, gasmax: u64 },

    #[error("offer list for {side} side is inactive")]
    InactiveBook { side: Side },

    #[error("exchange is dead")]
    ExchangeDead,

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for grid operations.
pub type GridResult<T> = std::result::Result<T, GridError>;
