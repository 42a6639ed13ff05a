//! Token reference data and the cashness ranking.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ERC-20 reference data, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Contract address.
    pub address: Address,
    /// Display symbol (e.g., "WETH").
    pub symbol: String,
    /// Smallest-unit decimals.
    pub decimals: u8,
}

impl Token {
    pub fn new(address: Address, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Cashness score of this token (see [`cashness`]).
    pub fn cashness(&self) -> u32 {
        cashness(&self.symbol)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Heuristic score deciding which token of a pair is the quote.
///
/// Stable coins rank highest, blue-chip wrapped assets next, everything
/// else zero. The higher-scoring token of a pair is treated as quote
/// ("cash"); ties fall back to discovery list order.
pub fn cashness(symbol: &str) -> u32 {
    match symbol.to_ascii_uppercase().as_str() {
        "USDC" => 1_000_000,
        "USDT" => 900_000,
        "DAI" => 800_000,
        "FRAX" => 700_000,
        "USDB" => 600_000,
        "WBTC" => 2_000,
        "WETH" | "ETH" => 1_000,
        _ => 0,
    }
}
