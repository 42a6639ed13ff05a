//! Chain collaborator traits.
//!
//! Object-safe async traits (boxed futures) so the engine can hold a
//! `dyn ChainReader` without committing to a transport. Mirrors the
//! shape of the on-chain reader/seeder periphery the engine is built
//! against.

use crate::error::ChainResult;
use crate::types::{GlobalConfig, MarketRaw, SideConfig, StrategyStatus, TxReceipt};
use alloy_primitives::Address;
use futures_util::future::BoxFuture;
use ladder_core::{BookKey, DistributionOffer, MarketKey, RawOrder};

/// Read-only chain access.
pub trait ChainReader: Send + Sync {
    /// List open markets, optionally with their current configs.
    fn open_markets(&self, with_config: bool) -> BoxFuture<'_, ChainResult<Vec<MarketRaw>>>;

    /// Page raw resting orders from one offer list, best price first.
    fn order_list(
        &self,
        key: BookKey,
        start_id: u64,
        max_count: u32,
    ) -> BoxFuture<'_, ChainResult<Vec<RawOrder>>>;

    /// Current config for one offer list.
    fn book_config(&self, key: BookKey)
        -> BoxFuture<'_, ChainResult<(SideConfig, GlobalConfig)>>;

    /// Wholesale snapshot of a deployed strategy.
    fn strategy_status(&self, strategy: Address) -> BoxFuture<'_, ChainResult<StrategyStatus>>;
}

/// Transaction submission. May fail; confirmation/retry policy is the
/// implementor's concern.
pub trait ChainWriter: Send + Sync {
    /// Deploy a fresh strategy contract for a market.
    fn create_strategy(&self, market: MarketKey) -> BoxFuture<'_, ChainResult<Address>>;

    /// Post a distribution's offers onto the strategy.
    fn populate(
        &self,
        strategy: Address,
        bids: Vec<DistributionOffer>,
        asks: Vec<DistributionOffer>,
    ) -> BoxFuture<'_, ChainResult<TxReceipt>>;

    /// Retract offers in `[from_index, to_index)` and send freed funds to
    /// `recipient`.
    fn retract(
        &self,
        strategy: Address,
        from_index: u32,
        to_index: u32,
        recipient: Address,
    ) -> BoxFuture<'_, ChainResult<TxReceipt>>;
}
