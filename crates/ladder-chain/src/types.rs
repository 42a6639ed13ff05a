//! Data read from and written to the chain collaborators.

use alloy_primitives::{B256, U256};
use ladder_core::{RawOrder, Side, Token};
use serde::{Deserialize, Serialize};

/// Per-side (offer list) exchange configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideConfig {
    /// Whether the offer list accepts new orders.
    pub active: bool,
    /// Taker fee in basis points.
    pub fee_bps: u32,
    /// Minimum outbound volume per unit of gas. An order must give
    /// strictly more than `density * (gasreq + offer_gasbase)`.
    pub density: U256,
    /// Gas overhead charged per offer on top of the strategy's gasreq.
    pub offer_gasbase: u64,
}

/// Exchange-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Gas price (native units per gas) used for provision accounting.
    pub gasprice: u64,
    /// Hard cap on per-order gasreq.
    pub gasmax: u64,
    /// Maximum market-order recursion depth; opaque to the engine.
    pub max_recursion_depth: u32,
    /// Exchange kill switch.
    pub dead: bool,
}

/// Both sides' configuration for one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub asks: SideConfig,
    pub bids: SideConfig,
    pub global: GlobalConfig,
}

impl MarketConfig {
    pub fn side(&self, side: Side) -> &SideConfig {
        match side {
            Side::Ask => &self.asks,
            Side::Bid => &self.bids,
        }
    }
}

/// An open market as reported by the reader, before base/quote
/// assignment. Token order carries the discovery list order used for
/// cashness tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRaw {
    pub token0: Token,
    pub token1: Token,
    pub tick_spacing: u32,
    pub config: Option<MarketConfig>,
}

/// Point-in-time snapshot of one deployed strategy contract.
///
/// Fetched wholesale; treated as immutable until explicitly refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyStatus {
    pub bids: Vec<RawOrder>,
    pub asks: Vec<RawOrder>,
    pub price_points: u32,
    pub step_size: u32,
    pub base_amount: U256,
    pub quote_amount: U256,
    pub reserve_balance_base: U256,
    pub reserve_balance_quote: U256,
    pub total_provision: U256,
    pub unlocked_provision: U256,
    pub gasreq: u64,
    pub gasprice: u64,
    pub reversed: bool,
}

impl StrategyStatus {
    /// Live resting orders on one side; zero-gives records are absent
    /// slots and filtered out.
    pub fn live_orders(&self, side: Side) -> impl Iterator<Item = &RawOrder> {
        let orders = match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        };
        orders.iter().filter(|o| o.is_live())
    }
}

/// Minimal confirmation of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub block_number: u64,
    pub success: bool,
}
