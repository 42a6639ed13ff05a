//! Market discovery.
//!
//! Turns raw open-market listings into ordered [`Market`]s. Base/quote
//! assignment happens exactly once here, via the cashness ranking;
//! downstream code never re-decides it.

use crate::types::{MarketConfig, MarketRaw};
use ladder_core::Market;
use tracing::{debug, warn};

/// A discovered market with the config it was listed with, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredMarket {
    pub market: Market,
    pub config: Option<MarketConfig>,
}

/// Order raw market pairs into base/quote markets.
///
/// Malformed pairs (identical token addresses) are skipped with a
/// warning rather than failing the whole discovery.
pub fn discover_markets(raw: Vec<MarketRaw>) -> Vec<DiscoveredMarket> {
    raw.into_iter()
        .filter_map(|entry| {
            match Market::from_pair(entry.token0, entry.token1, entry.tick_spacing) {
                Ok(market) => {
                    debug!(market = %market, tick_spacing = entry.tick_spacing, "discovered market");
                    Some(DiscoveredMarket {
                        market,
                        config: entry.config,
                    })
                }
                Err(err) => {
                    warn!(error = %err, "skipping malformed market pair");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use ladder_core::Token;

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
    fn test_discovery_orders_pairs() {
        let raw = vec![MarketRaw {
            token0: usdc(),
            token1: weth(),
            tick_spacing: 1,
            config: None,
        }];
        let markets = discover_markets(raw);
        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].market.display_name(), "WETH/USDC");
    }

    #[test]
    fn test_discovery_skips_malformed_pairs() {
        let raw = vec![
            MarketRaw {
                token0: weth(),
                token1: weth(),
                tick_spacing: 1,
                config: None,
            },
            MarketRaw {
                token0: weth(),
                token1: usdc(),
                tick_spacing: 1,
                config: None,
            },
        ];
        assert_eq!(discover_markets(raw).len(), 1);
    }
}
