//! Parameter validation against exchange minimums.
//!
//! Checks every funded grid point against the side's density floor,
//! computes the actionable minimum totals when the user's amounts are too
//! small, and prices the worst-case provision. Shortfalls are data, not
//! errors: the result is all-or-nothing but always carries the minimums
//! so the caller can fix the form without re-deriving anything.

use crate::distribution::{build_distribution, side_weights, sum_weights, Distribution};
use crate::error::{GridError, GridResult};
use crate::form::{RawStrategyParams, StrategyFormData};
use alloy_primitives::U256;
use ladder_chain::{MarketConfig, SideConfig};
use ladder_core::{decimal_from_raw, raw_from_decimal, DistributionOffer, Market, RawRounding, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One grid point that cannot meet the exchange minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityFailure {
    pub index: u32,
    pub side: Side,
    /// What the point would give (zero for an unfunded point).
    pub gives: U256,
    /// Smallest gives that clears the floor.
    pub required: U256,
}

/// Outcome of building and validating a strategy grid.
///
/// Never partially valid: either every point on both sides clears its
/// density floor, or `is_valid` is false and the distribution is
/// withheld while the minimums stay available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// The grid, present only when valid.
    pub distribution: Option<Distribution>,
    /// Per-point density shortfalls; empty when valid.
    pub failures: Vec<DensityFailure>,
    /// Smallest total base that would let every ask clear its floor.
    pub min_base_amount: U256,
    /// Smallest total quote that would let every bid clear its floor.
    pub min_quote_amount: U256,
    /// Worst-case native collateral: every slot on both sides funded.
    pub min_provision: U256,
    /// Echo of the raw parameters the result was computed from.
    pub params: RawStrategyParams,
}

#[cfg(test)]
impl ValidationResult {
    pub(crate) fn empty_for_tests() -> Self {
        Self {
            is_valid: false,
            distribution: None,
            failures: Vec::new(),
            min_base_amount: U256::ZERO,
            min_quote_amount: U256::ZERO,
            min_provision: U256::ZERO,
            params: StrategyFormData::default()
                .to_raw_params(&test_support::market())
                .unwrap(),
        }
    }
}

/// Smallest gives an order must exceed on this offer list.
fn density_floor(config: &SideConfig, gasreq: u64) -> U256 {
    config.density * U256::from(gasreq + config.offer_gasbase)
}

/// Smallest side total such that every funded point clears the floor,
/// given the weight profile. Gives are integers, so clearing a floor of
/// `f` means giving at least `f + 1`.
fn min_side_amount(funded: usize, factor: Decimal, floor: U256) -> GridResult<U256> {
    if funded == 0 {
        return Ok(U256::ZERO);
    }
    let weights = side_weights(funded, factor)?;
    let total = sum_weights(&weights, factor)?;
    let min_weight = match weights.iter().copied().min() {
        Some(w) if !w.is_zero() => w,
        _ => return Ok(U256::ZERO),
    };
    let per_point = decimal_from_raw(floor + U256::from(1u64), 0)?;
    let min_total = per_point
        .checked_mul(total)
        .and_then(|scaled| scaled.checked_div(min_weight))
        .ok_or_else(|| {
            GridError::InvalidRange(format!("minimum amount overflows with factor {factor}"))
        })?;
    // Computed at raw scale; round up to whole raw units
    Ok(raw_from_decimal(min_total, 0, RawRounding::Up)?)
}

fn check_side(
    side: Side,
    funded: &[u32],
    offers: &[DistributionOffer],
    floor: U256,
    failures: &mut Vec<DensityFailure>,
) {
    for &index in funded {
        let gives = offers
            .iter()
            .find(|o| o.index == index)
            .map(|o| o.gives)
            .unwrap_or(U256::ZERO);
        if gives <= floor {
            failures.push(DensityFailure {
                index,
                side,
                gives,
                required: floor + U256::from(1u64),
            });
        }
    }
}

/// Build the distribution for `form` and validate it against `config`.
///
/// Fails fast on malformed input or unusable exchange state; density
/// shortfalls come back inside the result.
pub fn build_and_validate(
    form: &StrategyFormData,
    market: &Market,
    config: &MarketConfig,
) -> GridResult<ValidationResult> {
    if config.global.dead {
        return Err(GridError::ExchangeDead);
    }
    for side in [Side::Ask, Side::Bid] {
        if !config.side(side).active {
            return Err(GridError::InactiveBook { side });
        }
    }

    let params = form.to_raw_params(market)?;
    if params.gasreq > config.global.gasmax {
        return Err(GridError::GasLimitExceeded {
            gasreq: params.gasreq,
            gasmax: config.global.gasmax,
        });
    }

    let distribution = build_distribution(&params, market)?;

    let ask_floor = density_floor(&config.asks, params.gasreq);
    let bid_floor = density_floor(&config.bids, params.gasreq);

    let funded_bids = distribution.funded_bid_indices();
    let mut failures = Vec::new();
    check_side(
        Side::Ask,
        distribution.funded_ask_indices(),
        &distribution.asks,
        ask_floor,
        &mut failures,
    );
    check_side(Side::Bid, &funded_bids, &distribution.bids, bid_floor, &mut failures);

    let min_base_amount =
        min_side_amount(distribution.funded_ask_indices().len(), params.factor, ask_floor)?;
    let min_quote_amount = min_side_amount(funded_bids.len(), params.factor, bid_floor)?;

    // Every one of the pricePoints slots on each side may eventually
    // host a resting order, and each must be individually funded.
    let points = U256::from(params.price_points);
    let per_ask = U256::from(params.gasreq + config.asks.offer_gasbase);
    let per_bid = U256::from(params.gasreq + config.bids.offer_gasbase);
    let min_provision = U256::from(config.global.gasprice) * points * (per_ask + per_bid);

    let is_valid = failures.is_empty();
    if is_valid {
        debug!(
            bids = distribution.bids.len(),
            asks = distribution.asks.len(),
            %min_provision,
            "distribution valid"
        );
    } else {
        warn!(
            failures = failures.len(),
            %min_base_amount,
            %min_quote_amount,
            "distribution failed density validation"
        );
    }

    Ok(ValidationResult {
        distribution: is_valid.then_some(distribution),
        is_valid,
        failures,
        min_base_amount,
        min_quote_amount,
        min_provision,
        params,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use alloy_primitives::{address, U256};
    use ladder_chain::{GlobalConfig, MarketConfig, SideConfig};
    use ladder_core::{Market, Token};

    pub fn market() -> Market {
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

    pub fn side_config(density: u64) -> SideConfig {
        SideConfig {
            active: true,
            fee_bps: 0,
            density: U256::from(density),
            offer_gasbase: 0,
        }
    }

    /// Floors of 0.01 base / 10 quote at gasreq 250k and zero gasbase.
    pub fn config() -> MarketConfig {
        MarketConfig {
            // 0.01 WETH = 1e16 raw over 250k gas
            asks: side_config(40_000_000_000),
            // 10 USDC = 1e7 raw over 250k gas
            bids: side_config(40),
            global: GlobalConfig {
                gasprice: 20,
                gasmax: 2_000_000,
                max_recursion_depth: 75,
                dead: false,
            },
        }
    }
}
