//! Error types for ladder-chain.

use thiserror::Error;

/// Transport-level failures from the chain collaborators.
///
/// The engine does not retry these; it surfaces them and preserves any
/// last-good cached state. They are fatal to the current operation only,
/// never to the session.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("chain read failed: {0}")]
    Read(String),

    #[error("chain write failed: {0}")]
    Write(String),

    #[error("malformed chain response: {0}")]
    Malformed(String),
}

/// Result type alias for chain operations.
pub type ChainResult<T> = std::result::Result<T, ChainError>;
