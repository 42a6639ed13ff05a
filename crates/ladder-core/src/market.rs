//! Market identification and reference data.
//!
//! A market is an ordered token pair plus a tick spacing. Which token is
//! base vs quote is decided once, at discovery time, by the cashness
//! ranking; the assignment never changes afterwards.

use crate::error::{CoreError, CoreResult};
use crate::side::Side;
use crate::token::Token;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default decimal places used to coalesce displayed price levels.
pub const DEFAULT_PRICE_DISPLAY_DECIMALS: u32 = 2;

/// Unique market identifier: base address, quote address, tick spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketKey {
    pub base: Address,
    pub quote: Address,
    pub tick_spacing: u32,
}

impl fmt::Display for MarketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.base, self.quote, self.tick_spacing)
    }
}

/// One side's offer-list key: which token the resting orders give away.
///
/// Asks give base and want quote; bids the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookKey {
    pub outbound: Address,
    pub inbound: Address,
    pub tick_spacing: u32,
}

/// Market reference data, shared and read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub base: Token,
    pub quote: Token,
    /// Posted ticks must be multiples of this. Fixed per market.
    pub tick_spacing: u32,
    /// Decimal places for display-level price coalescing.
    pub price_display_decimals: u32,
}

impl Market {
    /// Build a market from an unordered discovery pair.
    ///
    /// The token with the higher cashness score becomes the quote; on a
    /// tie `token0` stays base (list order).
    pub fn from_pair(token0: Token, token1: Token, tick_spacing: u32) -> CoreResult<Self> {
        if token0.address == token1.address {
            return Err(CoreError::IdenticalTokens(token0.address));
        }
        let (base, quote) = if token0.cashness() > token1.cashness() {
            (token1, token0)
        } else {
            (token0, token1)
        };
        Ok(Self {
            base,
            quote,
            tick_spacing,
            price_display_decimals: DEFAULT_PRICE_DISPLAY_DECIMALS,
        })
    }

    pub fn key(&self) -> MarketKey {
        MarketKey {
            base: self.base.address,
            quote: self.quote.address,
            tick_spacing: self.tick_spacing,
        }
    }

    /// Display name, e.g. "WETH/USDC".
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.base.symbol, self.quote.symbol)
    }

    /// Offer-list key for one side of this market.
    pub fn book_key(&self, side: Side) -> BookKey {
        match side {
            Side::Ask => BookKey {
                outbound: self.base.address,
                inbound: self.quote.address,
                tick_spacing: self.tick_spacing,
            },
            Side::Bid => BookKey {
                outbound: self.quote.address,
                inbound: self.base.address,
                tick_spacing: self.tick_spacing,
            },
        }
    }

    pub fn ask_key(&self) -> BookKey {
        self.book_key(Side::Ask)
    }

    pub fn bid_key(&self) -> BookKey {
        self.book_key(Side::Bid)
    }

    /// The token a resting order on `side` gives away.
    pub fn outbound_token(&self, side: Side) -> &Token {
        match side {
            Side::Ask => &self.base,
            Side::Bid => &self.quote,
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn weth() -> Token {
        Token::new(
            address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            "WETH",
            18,
        )
    }

    fn usdc() -> Token {
        Token::new(
            address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            "USDC",
            6,
        )
    }

    #[test]
    fn test_cashness_assigns_quote() {
        // Discovery order should not matter: USDC is always quote
        let m1 = Market::from_pair(weth(), usdc(), 1).unwrap();
        let m2 = Market::from_pair(usdc(), weth(), 1).unwrap();
        assert_eq!(m1.display_name(), "WETH/USDC");
        assert_eq!(m2.display_name(), "WETH/USDC");
        assert_eq!(m1.key(), m2.key());
    }

    #[test]
    fn test_tie_keeps_list_order() {
        let a = Token::new(
            address!("0000000000000000000000000000000000000001"),
            "AAA",
            18,
        );
        let b = Token::new(
            address!("0000000000000000000000000000000000000002"),
            "BBB",
            18,
        );
        let m = Market::from_pair(a.clone(), b, 1).unwrap();
        assert_eq!(m.base, a);
    }

    #[test]
    fn test_identical_tokens_rejected() {
        let t = weth();
        assert!(Market::from_pair(t.clone(), t, 1).is_err());
    }

    #[test]
    fn test_book_keys() {
        let m = Market::from_pair(weth(), usdc(), 1).unwrap();
        assert_eq!(m.ask_key().outbound, m.base.address);
        assert_eq!(m.bid_key().outbound, m.quote.address);
        assert_eq!(m.ask_key().inbound, m.bid_key().outbound);
    }
}
