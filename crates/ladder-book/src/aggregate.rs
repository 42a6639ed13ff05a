//! Level aggregation and own-order overlay.

use crate::error::BookResult;
use ladder_core::{HumanOrder, Market, Price, RawOrder, Side, Volume};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// Display cap: levels nearest the inside of the book, per side.
///
/// A display-scope invariant, not a data-loss concern; callers needing
/// more levels page the chain reader directly.
pub const MAX_BOOK_LEVELS: usize = 11;

/// One aggregated price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    /// Displayed price (rounded to the market's display decimals).
    pub price: Price,
    /// Total base volume resting at this displayed price.
    pub volume: Volume,
    /// This level's volume plus all better-priced levels' volumes.
    pub depth: Volume,
    /// Whether one of the user's own orders rests at this price.
    pub is_own: bool,
    /// The user's own volume at this price; a separate addend, never
    /// subtracted from the public volume.
    pub own_volume: Volume,
}

/// Both sides of the aggregated book.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregatedBook {
    /// Best (lowest) ask first.
    pub asks: Vec<BookLevel>,
    /// Best (highest) bid first.
    pub bids: Vec<BookLevel>,
}

/// Convert a strategy's raw resting orders for the overlay, dropping
/// empty slots.
pub fn own_orders(raw: &[RawOrder], market: &Market) -> BookResult<Vec<HumanOrder>> {
    raw.iter()
        .filter(|o| o.is_live())
        .map(|o| HumanOrder::from_raw(o, market).map_err(Into::into))
        .collect()
}

/// Sum orders of one side into displayed-price buckets.
fn bucket_volumes(
    orders: impl Iterator<Item = HumanOrder>,
    decimals: u32,
) -> BTreeMap<Decimal, Decimal> {
    let mut buckets: BTreeMap<Decimal, Decimal> = BTreeMap::new();
    for order in orders {
        let key = order.price.display_key(decimals).inner();
        *buckets.entry(key).or_default() += order.base_volume.inner();
    }
    buckets
}

fn side_levels(
    raw: &[RawOrder],
    side: Side,
    own: &[HumanOrder],
    market: &Market,
) -> BookResult<Vec<BookLevel>> {
    let decimals = market.price_display_decimals;

    let public = raw
        .iter()
        .filter(|o| o.is_live() && o.side == side)
        .map(|o| HumanOrder::from_raw(o, market))
        .collect::<Result<Vec<_>, _>>()?;
    let buckets = bucket_volumes(public.into_iter(), decimals);
    let own_buckets = bucket_volumes(own.iter().copied().filter(|o| o.side == side), decimals);

    // Best price first: lowest ask, highest bid
    let ordered: Vec<(Decimal, Decimal)> = match side {
        Side::Ask => buckets.into_iter().take(MAX_BOOK_LEVELS).collect(),
        Side::Bid => buckets.into_iter().rev().take(MAX_BOOK_LEVELS).collect(),
    };

    let mut depth = Decimal::ZERO;
    let levels = ordered
        .into_iter()
        .map(|(price, volume)| {
            depth += volume;
            let own_volume = own_buckets.get(&price).copied().unwrap_or_default();
            BookLevel {
                price: Price::new(price),
                volume: Volume::new(volume),
                depth: Volume::new(depth),
                is_own: !own_volume.is_zero(),
                own_volume: Volume::new(own_volume),
            }
        })
        .collect::<Vec<_>>();

    trace!(%side, levels = levels.len(), "aggregated book side");
    Ok(levels)
}

/// Aggregate both sides of a market's book and overlay the user's own
/// resting orders.
///
/// Orders are grouped by displayed price, so ticks rounding to the same
/// price merge into one level. Cumulative depth is non-decreasing
/// walking away from the best price on each side.
pub fn aggregate_book(
    raw_asks: &[RawOrder],
    raw_bids: &[RawOrder],
    own: &[HumanOrder],
    market: &Market,
) -> BookResult<AggregatedBook> {
    Ok(AggregatedBook {
        asks: side_levels(raw_asks, Side::Ask, own, market)?,
        bids: side_levels(raw_bids, Side::Bid, own, market)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};
    use ladder_core::{price_to_tick, raw_from_decimal, RawRounding, Token};
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

    fn ask(market: &Market, price: Decimal, base: Decimal) -> RawOrder {
        let tick = price_to_tick(
            Price::new(price),
            Side::Ask,
            market.base.decimals,
            market.quote.decimals,
        )
        .unwrap();
        let gives = raw_from_decimal(base, market.base.decimals, RawRounding::Down).unwrap();
        RawOrder::new(tick, gives, Side::Ask)
    }

    fn bid(market: &Market, price: Decimal, quote: Decimal) -> RawOrder {
        let tick = price_to_tick(
            Price::new(price),
            Side::Bid,
            market.base.decimals,
            market.quote.decimals,
        )
        .unwrap();
        let gives = raw_from_decimal(quote, market.quote.decimals, RawRounding::Down).unwrap();
        RawOrder::new(tick, gives, Side::Bid)
    }

    #[test]
    fn test_same_tick_orders_merge() {
        let market = market();
        // 3010.001 and 3010.004 are far closer than one tick apart, so
        // they land on the same displayed level; 3020 stays separate
        let asks = vec![
            ask(&market, dec!(3010.001), dec!(1)),
            ask(&market, dec!(3010.004), dec!(2)),
            ask(&market, dec!(3020), dec!(4)),
        ];
        let book = aggregate_book(&asks, &[], &[], &market).unwrap();
        assert_eq!(book.asks.len(), 2);
        assert_eq!(book.asks[0].volume.inner(), dec!(3));
        assert_eq!(book.asks[0].depth.inner(), dec!(3));
        assert_eq!(book.asks[1].volume.inner(), dec!(4));
        assert_eq!(book.asks[1].depth.inner(), dec!(7));
    }

    #[test]
    fn test_level_cap() {
        let market = market();
        // 500 orders at distinct prices collapse to the cap
        let asks: Vec<RawOrder> = (0..500)
            .map(|i| ask(&market, dec!(3000) + Decimal::from(i * 5), dec!(0.1)))
            .collect();
        let book = aggregate_book(&asks, &[], &[], &market).unwrap();
        assert!(book.asks.len() <= MAX_BOOK_LEVELS);
        // The cap keeps the levels nearest the inside (lowest asks)
        assert!(book.asks[0].price.inner() < dec!(3010));
    }

    #[test]
    fn test_depth_monotone_both_sides() {
        let market = market();
        let asks: Vec<RawOrder> = (0..8)
            .map(|i| ask(&market, dec!(3005) + Decimal::from(i * 10), dec!(0.5)))
            .collect();
        let bids: Vec<RawOrder> = (0..8)
            .map(|i| bid(&market, dec!(2995) - Decimal::from(i * 10), dec!(500)))
            .collect();
        let book = aggregate_book(&asks, &bids, &[], &market).unwrap();

        for side in [&book.asks, &book.bids] {
            for w in side.windows(2) {
                assert!(w[1].depth >= w[0].depth);
            }
        }
        // Asks ascend, bids descend from the inside
        for w in book.asks.windows(2) {
            assert!(w[1].price > w[0].price);
        }
        for w in book.bids.windows(2) {
            assert!(w[1].price < w[0].price);
        }
    }

    #[test]
    fn test_zero_gives_filtered() {
        let market = market();
        let mut dead = ask(&market, dec!(3010), dec!(1));
        dead.gives = U256::ZERO;
        let book = aggregate_book(&[dead], &[], &[], &market).unwrap();
        assert!(book.asks.is_empty());
    }

    #[test]
    fn test_own_order_overlay() {
        let market = market();
        let public = vec![
            ask(&market, dec!(3010), dec!(2)),
            ask(&market, dec!(3020), dec!(1)),
        ];
        // The user's own resting order sits on the first level
        let own_raw = vec![ask(&market, dec!(3010), dec!(0.5))];
        let own = own_orders(&own_raw, &market).unwrap();

        let book = aggregate_book(&public, &[], &own, &market).unwrap();
        assert!(book.asks[0].is_own);
        assert_eq!(book.asks[0].own_volume.inner(), dec!(0.5));
        // Public volume is untouched; ownership is additive info only
        assert_eq!(book.asks[0].volume.inner(), dec!(2));
        assert!(!book.asks[1].is_own);
        assert!(book.asks[1].own_volume.is_zero());
    }

    #[test]
    fn test_own_orders_drops_empty_slots() {
        let market = market();
        let mut dead = ask(&market, dec!(3010), dec!(1));
        dead.gives = U256::ZERO;
        let live = ask(&market, dec!(3020), dec!(1));
        let own = own_orders(&[dead, live], &market).unwrap();
        assert_eq!(own.len(), 1);
    }
}
