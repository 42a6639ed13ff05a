//! Error types for ladder-state.

use alloy_primitives::{Address, B256};
use ladder_chain::ChainError;
use ladder_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("unknown strategy {0}")]
    UnknownStrategy(Address),

    #[error("refresh failed for strategy {strategy}: {message}")]
    RefreshFailed { strategy: Address, message: String },

    #[error("transaction {0} reverted")]
    TxReverted(B256),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type StateResult<T> = std::result::Result<T, StateError>;
