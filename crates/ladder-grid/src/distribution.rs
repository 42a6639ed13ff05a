//! Geometric grid distribution builder.
//!
//! Builds `price_points` ticks spanning `[min_price, max_price]` with
//! equal tick increments (constant price ratio between adjacent points),
//! partitions them around the mid price, and apportions the base/quote
//! amounts across the funded points. The builder is pure: it produces
//! the static initial grid and nothing else. `step_size` is carried
//! through untouched for the strategy contract that reposts duals after
//! fills.

use crate::error::{GridError, GridResult};
use crate::form::RawStrategyParams;
use alloy_primitives::U256;
use ladder_core::{
    decimal_from_raw, nearest_bin, price_to_tick, raw_from_decimal, DistributionOffer, Market,
    RawRounding, Side, MAX_TICK,
};
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A built strategy distribution.
///
/// `ticks` are in quote-per-base (ask) space, one per price point,
/// ascending; bid offers carry the negated tick for their own offer
/// list. The index partition covers every point even when a point
/// carries no volume; offers list only volume-bearing points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub price_points: u32,
    /// Grid points skipped when reposting the dual of a filled order.
    /// Not consumed here; forwarded to the placing strategy.
    pub step_size: u32,
    pub ticks: Vec<i32>,
    /// Tick (ask space) of the mid price; the partition boundary.
    pub mid_tick: i32,
    /// Points at or below the mid price.
    pub bid_indices: Vec<u32>,
    /// Points strictly above the mid price.
    pub ask_indices: Vec<u32>,
    pub bids: Vec<DistributionOffer>,
    pub asks: Vec<DistributionOffer>,
}

impl Distribution {
    /// Bid points eligible for inventory: strictly below the mid tick.
    /// A point exactly at the mid is the boundary, never funded.
    pub fn funded_bid_indices(&self) -> Vec<u32> {
        self.bid_indices
            .iter()
            .copied()
            .filter(|&i| self.ticks[i as usize] < self.mid_tick)
            .collect()
    }

    pub fn funded_ask_indices(&self) -> &[u32] {
        &self.ask_indices
    }
}

/// Per-point apportionment weights for one side.
///
/// `factor^j` with `j` the distance rank from the mid outward, so factor
/// 1 is a uniform split, factor > 1 loads the far end of the ladder and
/// factor < 1 the inside.
pub(crate) fn side_weights(count: usize, factor: Decimal) -> GridResult<Vec<Decimal>> {
    (0..count)
        .map(|j| {
            factor
                .checked_powi(j as i64)
                .ok_or_else(|| GridError::InvalidRange(format!("factor {factor} too extreme")))
        })
        .collect()
}

/// Checked total of one side's weights.
pub(crate) fn sum_weights(weights: &[Decimal], factor: Decimal) -> GridResult<Decimal> {
    weights
        .iter()
        .try_fold(Decimal::ZERO, |acc, w| acc.checked_add(*w))
        .ok_or_else(|| GridError::InvalidRange(format!("factor {factor} too extreme")))
}

fn ceil_div(a: i64, b: i64) -> i64 {
    (a + b - 1) / b
}

/// Build the tick grid and apportion volumes.
pub fn build_distribution(
    params: &RawStrategyParams,
    market: &Market,
) -> GridResult<Distribution> {
    if !(params.min_price < params.mid_price && params.mid_price < params.max_price) {
        return Err(GridError::InvalidRange(format!(
            "prices must satisfy min < mid < max, got {} / {} / {}",
            params.min_price, params.mid_price, params.max_price
        )));
    }
    if params.price_points < 2 {
        return Err(GridError::InvalidRange(format!(
            "price points must be at least 2, got {}",
            params.price_points
        )));
    }
    if params.step_size == 0 || params.step_size >= params.price_points {
        return Err(GridError::InvalidRange(format!(
            "step size must be in [1, {}), got {}",
            params.price_points, params.step_size
        )));
    }
    if params.factor <= Decimal::ZERO {
        return Err(GridError::InvalidRange(format!(
            "factor must be positive, got {}",
            params.factor
        )));
    }

    let base_decimals = market.base.decimals;
    let quote_decimals = market.quote.decimals;
    let spacing = market.tick_spacing;

    // The grid lives in ask (quote-per-base) tick space; bids get the
    // negated tick for their reversed offer list.
    let min_tick = nearest_bin(
        price_to_tick(params.min_price, Side::Ask, base_decimals, quote_decimals)?,
        spacing,
    );
    let max_tick = price_to_tick(params.max_price, Side::Ask, base_decimals, quote_decimals)?;
    let mid_tick = price_to_tick(params.mid_price, Side::Ask, base_decimals, quote_decimals)?;

    let span = i64::from(max_tick) - i64::from(min_tick);
    if span <= 0 {
        return Err(GridError::InvalidRange(
            "price range is narrower than one tick spacing".to_string(),
        ));
    }
    // One tick per point at minimum; also bounds the grid allocation.
    if i64::from(params.price_points) - 1 > span {
        return Err(GridError::InvalidRange(format!(
            "cannot fit {} price points into a {span}-tick range",
            params.price_points
        )));
    }
    let raw_step = ceil_div(span, i64::from(params.price_points) - 1);
    let tick_step = ceil_div(raw_step, i64::from(spacing.max(1))) * i64::from(spacing.max(1));

    let mut ticks = Vec::with_capacity(params.price_points as usize);
    for i in 0..i64::from(params.price_points) {
        let tick = i64::from(min_tick) + i * tick_step;
        if tick > i64::from(MAX_TICK) {
            return Err(GridError::InvalidRange(format!(
                "grid point {i} at tick {tick} exceeds the tick range"
            )));
        }
        ticks.push(tick as i32);
    }

    let mut bid_indices = Vec::new();
    let mut ask_indices = Vec::new();
    for (i, &tick) in ticks.iter().enumerate() {
        if tick <= mid_tick {
            bid_indices.push(i as u32);
        } else {
            ask_indices.push(i as u32);
        }
    }

    // Funded bids exclude a point sitting exactly on the mid tick.
    let funded_bids: Vec<u32> = bid_indices
        .iter()
        .copied()
        .filter(|&i| ticks[i as usize] < mid_tick)
        .collect();

    let bids = apportion(
        &funded_bids,
        &ticks,
        Side::Bid,
        params.quote_amount,
        quote_decimals,
        params,
    )?;
    let asks = apportion(
        &ask_indices,
        &ticks,
        Side::Ask,
        params.base_amount,
        base_decimals,
        params,
    )?;

    debug!(
        price_points = params.price_points,
        tick_step,
        bids = bids.len(),
        asks = asks.len(),
        "built distribution"
    );

    Ok(Distribution {
        price_points: params.price_points,
        step_size: params.step_size,
        ticks,
        mid_tick,
        bid_indices,
        ask_indices,
        bids,
        asks,
    })
}

/// Split `amount` (raw units of the side's outbound token) across the
/// side's funded points by the factor weight profile.
fn apportion(
    indices: &[u32],
    ticks: &[i32],
    side: Side,
    amount: U256,
    outbound_decimals: u8,
    params: &RawStrategyParams,
) -> GridResult<Vec<DistributionOffer>> {
    if indices.is_empty() || amount.is_zero() {
        return Ok(Vec::new());
    }

    let weights = side_weights(indices.len(), params.factor)?;
    let total_weight = sum_weights(&weights, params.factor)?;
    let amount_h = decimal_from_raw(amount, outbound_decimals)?;
    let rounding = if params.adjust {
        RawRounding::Up
    } else {
        RawRounding::Down
    };

    let mut offers = Vec::with_capacity(indices.len());
    for (pos, &index) in indices.iter().enumerate() {
        // Rank 0 is the point nearest the mid: last bid, first ask.
        let rank = match side {
            Side::Bid => indices.len() - 1 - pos,
            Side::Ask => pos,
        };
        let share = amount_h
            .checked_mul(weights[rank])
            .and_then(|scaled| scaled.checked_div(total_weight))
            .ok_or_else(|| {
                GridError::InvalidRange(format!(
                    "allocation for point {index} overflows with factor {}",
                    params.factor
                ))
            })?;
        let gives = raw_from_decimal(share, outbound_decimals, rounding)?;
        if gives.is_zero() {
            continue;
        }
        let grid_tick = ticks[index as usize];
        let tick = match side {
            Side::Ask => grid_tick,
            Side::Bid => -grid_tick,
        };
        offers.push(DistributionOffer { index, tick, gives });
    }
    Ok(offers)
}
