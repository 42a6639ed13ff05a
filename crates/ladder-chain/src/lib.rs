//! Abstract chain collaborator contracts.
//!
//! The engine never talks to a node directly. Everything it needs from
//! the chain goes through the [`ChainReader`] / [`ChainWriter`] traits,
//! keeping the core pure and letting tests substitute in-memory mocks.
//! Transport concerns (RPC, retries, confirmation policy) belong to the
//! implementor, not to this crate.

pub mod discover;
pub mod error;
pub mod mock;
pub mod reader;
pub mod types;

pub use discover::{discover_markets, DiscoveredMarket};
pub use error::{ChainError, ChainResult};
pub use mock::{MockChainReader, MockChainWriter};
pub use reader::{ChainReader, ChainWriter};
pub use types::{GlobalConfig, MarketConfig, MarketRaw, SideConfig, StrategyStatus, TxReceipt};
