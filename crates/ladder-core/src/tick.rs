//! Tick/price codec.
//!
//! The exchange prices orders on a fixed logarithmic grid: one tick is a
//! 1.0001x price ratio in raw (smallest-unit) terms. This module is the
//! single source of truth for converting between that grid and human
//! decimal prices; every other component calls in here rather than
//! re-deriving prices.
//!
//! The decimal output is display-grade. Precision loss is acceptable for
//! display but must never be fed back into order placement: placement
//! always goes through ticks.

use crate::decimal::Price;
use crate::error::{CoreError, CoreResult};
use crate::side::Side;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Highest representable tick on the exchange grid.
pub const MAX_TICK: i32 = 887_272;
/// Lowest representable tick.
pub const MIN_TICK: i32 = -MAX_TICK;

/// Price ratio of one tick.
const TICK_BASE: f64 = 1.0001;

fn check_tick(tick: i32) -> CoreResult<i32> {
    if (MIN_TICK..=MAX_TICK).contains(&tick) {
        Ok(tick)
    } else {
        Err(CoreError::InvalidTick(tick))
    }
}

/// Decimal-scale factor between raw price ratios and human prices.
fn decimal_scale(base_decimals: u8, quote_decimals: u8) -> f64 {
    10f64.powi(base_decimals as i32 - quote_decimals as i32)
}

/// Convert an integer tick into a human price (quote per base).
///
/// A tick encodes the raw inbound/outbound ratio of the side's offer
/// list. For an ask the outbound token is base, so the human price is
/// `1.0001^tick` scaled by the decimal difference. A bid lives in the
/// reversed offer list (outbound = quote); the same tick space is
/// reinterpreted with the sign flipped to produce the equivalent
/// quote-per-base price from the buyer's perspective.
pub fn tick_to_price(
    tick: i32,
    side: Side,
    base_decimals: u8,
    quote_decimals: u8,
) -> CoreResult<Price> {
    let tick = check_tick(tick)?;
    let signed = match side {
        Side::Ask => tick,
        Side::Bid => -tick,
    };
    let px = TICK_BASE.powi(signed) * decimal_scale(base_decimals, quote_decimals);
    if !px.is_finite() || px <= 0.0 {
        return Err(CoreError::PriceOutOfRange(format!(
            "tick {tick} ({side}) produced unrepresentable price"
        )));
    }
    let price = rust_decimal::Decimal::from_f64(px)
        .map(Price::new)
        .ok_or_else(|| {
            CoreError::PriceOutOfRange(format!("tick {tick} ({side}) price {px} exceeds decimal"))
        })?;
    if price.is_zero() {
        return Err(CoreError::PriceOutOfRange(format!(
            "tick {tick} ({side}) price underflows decimal"
        )));
    }
    Ok(price)
}

/// Convert a human price into the nearest integer tick.
///
/// Inverse of [`tick_to_price`] up to rounding: the result is within one
/// tick of any tick that produced the price.
pub fn price_to_tick(
    price: Price,
    side: Side,
    base_decimals: u8,
    quote_decimals: u8,
) -> CoreResult<i32> {
    if !price.is_positive() {
        return Err(CoreError::InvalidPrice(format!(
            "price {price} must be positive"
        )));
    }
    let p = price
        .inner()
        .to_f64()
        .ok_or_else(|| CoreError::InvalidPrice(price.to_string()))?;
    let ratio = p / decimal_scale(base_decimals, quote_decimals);
    let signed = (ratio.ln() / TICK_BASE.ln()).round();
    if !signed.is_finite() || signed.abs() > MAX_TICK as f64 {
        return Err(CoreError::PriceOutOfRange(format!(
            "price {price} outside the tick grid"
        )));
    }
    let signed = signed as i32;
    check_tick(match side {
        Side::Ask => signed,
        Side::Bid => -signed,
    })
}

/// Align a tick to the nearest multiple of the market's tick spacing.
pub fn nearest_bin(tick: i32, tick_spacing: u32) -> i32 {
    let spacing = tick_spacing.max(1) as i32;
    let rem = tick.rem_euclid(spacing);
    if rem * 2 >= spacing {
        tick - rem + spacing
    } else {
        tick - rem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const WETH_DECIMALS: u8 = 18;
    const USDC_DECIMALS: u8 = 6;

    #[test]
    fn test_ask_price_at_tick_zero() {
        // Equal decimals: tick 0 is exactly price 1
        let p = tick_to_price(0, Side::Ask, 18, 18).unwrap();
        assert_eq!(p.inner(), dec!(1));
    }

    #[test]
    fn test_bid_and_ask_reinterpret_tick() {
        // The same tick read from opposite sides gives reciprocal prices
        let ask = tick_to_price(1000, Side::Ask, 18, 18).unwrap();
        let bid = tick_to_price(1000, Side::Bid, 18, 18).unwrap();
        let product = ask.inner() * bid.inner();
        assert!((product - dec!(1)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_decimal_scaling() {
        // WETH/USDC at ~3000: raw ratio is 3000 * 10^(6-18)
        let tick =
            price_to_tick(Price::new(dec!(3000)), Side::Ask, WETH_DECIMALS, USDC_DECIMALS).unwrap();
        let price = tick_to_price(tick, Side::Ask, WETH_DECIMALS, USDC_DECIMALS).unwrap();
        let rel_err = ((price.inner() - dec!(3000)) / dec!(3000)).abs();
        assert!(rel_err < dec!(0.0001), "price {price} too far from 3000");
    }

    #[test]
    fn test_round_trip_within_one_tick() {
        for side in [Side::Ask, Side::Bid] {
            for tick in [-196278, -5000, -1, 0, 1, 12345, 200000] {
                let price = tick_to_price(tick, side, WETH_DECIMALS, USDC_DECIMALS).unwrap();
                let back = price_to_tick(price, side, WETH_DECIMALS, USDC_DECIMALS).unwrap();
                assert!(
                    (back - tick).abs() <= 1,
                    "{side} tick {tick} round-tripped to {back}"
                );
            }
        }
    }

    #[test]
    fn test_tick_range_enforced() {
        assert!(tick_to_price(MAX_TICK + 1, Side::Ask, 18, 6).is_err());
        assert!(tick_to_price(MIN_TICK - 1, Side::Bid, 18, 6).is_err());
    }

    #[test]
    fn test_nonpositive_price_rejected() {
        assert!(price_to_tick(Price::ZERO, Side::Ask, 18, 6).is_err());
        assert!(price_to_tick(Price::new(dec!(-1)), Side::Bid, 18, 6).is_err());
    }

    #[test]
    fn test_nearest_bin() {
        assert_eq!(nearest_bin(103, 10), 100);
        assert_eq!(nearest_bin(105, 10), 110);
        assert_eq!(nearest_bin(-103, 10), -100);
        assert_eq!(nearest_bin(-106, 10), -110);
        assert_eq!(nearest_bin(7, 1), 7);
    }
}
