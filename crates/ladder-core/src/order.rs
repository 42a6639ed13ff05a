//! Order representations.
//!
//! `RawOrder` is the on-chain record; `HumanOrder` is its display form,
//! derived through the tick codec and never hand-edited.
//! `DistributionOffer` is one grid point of a strategy distribution,
//! addressed by price-point index and placed by tick.

use crate::decimal::{decimal_from_raw, Price, Volume};
use crate::error::CoreResult;
use crate::market::Market;
use crate::side::Side;
use crate::tick::tick_to_price;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// A resting order as read from the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOrder {
    /// Price tick on the exchange grid.
    pub tick: i32,
    /// Raw smallest-unit amount of the side's outbound token.
    pub gives: U256,
    /// Book side the order rests on.
    pub side: Side,
}

impl RawOrder {
    pub fn new(tick: i32, gives: U256, side: Side) -> Self {
        Self { tick, gives, side }
    }

    /// An order giving nothing is logically absent.
    pub fn is_live(&self) -> bool {
        !self.gives.is_zero()
    }
}

/// Display form of a resting order.
///
/// Derived losslessly (at the tick level) from [`RawOrder`] plus market
/// decimals; the decimal price itself is display-grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanOrder {
    pub side: Side,
    /// Quote-per-base price at the order's tick.
    pub price: Price,
    /// Order size in base tokens.
    pub base_volume: Volume,
    /// Order size in quote tokens.
    pub quote_volume: Volume,
}

impl HumanOrder {
    /// Derive the display form of a raw order on `market`.
    ///
    /// Asks give base, so `gives` converts directly to a base volume;
    /// bids give quote, and the base volume falls out of the price.
    pub fn from_raw(order: &RawOrder, market: &Market) -> CoreResult<Self> {
        let base_decimals = market.base.decimals;
        let quote_decimals = market.quote.decimals;
        let price = tick_to_price(order.tick, order.side, base_decimals, quote_decimals)?;
        let (base_volume, quote_volume) = match order.side {
            Side::Ask => {
                let base = Volume::new(decimal_from_raw(order.gives, base_decimals)?);
                (base, base.notional(price))
            }
            Side::Bid => {
                let quote = Volume::new(decimal_from_raw(order.gives, quote_decimals)?);
                (quote / price, quote)
            }
        };
        Ok(Self {
            side: order.side,
            price,
            base_volume,
            quote_volume,
        })
    }
}

/// One grid point of a strategy distribution.
///
/// Only points that actually carry volume become offers; zero-volume
/// points are omitted, not zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionOffer {
    /// Price-point index in `[0, price_points)`.
    pub index: u32,
    /// Tick the offer will be posted at.
    pub tick: i32,
    /// Raw outbound amount.
    pub gives: U256,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use alloy_primitives::address;
    use rust_decimal_macros::dec;

    fn market() -> Market {
        Market::from_pair(
            Token::new(
                address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
                "WETH",
                18,
            ),
            Token::new(
                address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
                "USDC",
                6,
            ),
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_zero_gives_not_live() {
        let order = RawOrder::new(0, U256::ZERO, Side::Ask);
        assert!(!order.is_live());
        assert!(RawOrder::new(0, U256::from(1), Side::Ask).is_live());
    }

    #[test]
    fn test_ask_volumes() {
        let market = market();
        // Ask at ~3000 giving 2 WETH
        let tick = crate::tick::price_to_tick(
            Price::new(dec!(3000)),
            Side::Ask,
            market.base.decimals,
            market.quote.decimals,
        )
        .unwrap();
        let raw = RawOrder::new(tick, U256::from(2_000_000_000_000_000_000u128), Side::Ask);
        let human = HumanOrder::from_raw(&raw, &market).unwrap();
        assert_eq!(human.base_volume.inner(), dec!(2));
        let rel = ((human.quote_volume.inner() - dec!(6000)) / dec!(6000)).abs();
        assert!(rel < dec!(0.001));
    }

    #[test]
    fn test_bid_volumes() {
        let market = market();
        // Bid at ~3000 giving 6000 USDC
        let tick = crate::tick::price_to_tick(
            Price::new(dec!(3000)),
            Side::Bid,
            market.base.decimals,
            market.quote.decimals,
        )
        .unwrap();
        let raw = RawOrder::new(tick, U256::from(6_000_000_000u64), Side::Bid);
        let human = HumanOrder::from_raw(&raw, &market).unwrap();
        assert_eq!(human.quote_volume.inner(), dec!(6000));
        let rel = ((human.base_volume.inner() - dec!(2)) / dec!(2)).abs();
        assert!(rel < dec!(0.001));
    }
}
