//! Precision-safe decimal types for human-denominated amounts.
//!
//! Uses `rust_decimal` for exact decimal arithmetic on the display side.
//! Raw on-chain amounts stay in `U256` smallest units; the conversions
//! between the two representations live here so no other module scales by
//! token decimals on its own.

use crate::error::{CoreError, CoreResult};
use alloy_primitives::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Div;
use std::str::FromStr;

/// Human-denominated price (quote per base).
///
/// Wraps `Decimal` to keep prices from mixing with volumes in
/// calculations. Prices are display-grade: order placement always goes
/// through ticks, never back through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// The price rounded to `decimals` places, used as the coalescing key
    /// for displayed order book levels. Two ticks that round to the same
    /// key are intentionally merged.
    #[inline]
    pub fn display_key(&self, decimals: u32) -> Price {
        Self(self.0.round_dp(decimals).normalize())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

/// Human-denominated volume (token amount).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume(pub Decimal);

impl Volume {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Quote-denominated value of this base volume at `price`.
    #[inline]
    pub fn notional(&self, price: Price) -> Volume {
        Self(self.0 * price.0)
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Volume {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Div<Price> for Volume {
    type Output = Self;

    fn div(self, rhs: Price) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

/// Rounding direction when scaling a human amount to raw units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawRounding {
    /// Truncate toward zero (default when splitting totals).
    Down,
    /// Round up, avoiding under-provisioning from truncation.
    Up,
}

/// Maximum token decimals `Decimal` can represent as a scale.
const MAX_DECIMALS: u8 = 28;

/// Convert a raw smallest-unit amount into a human `Decimal`.
pub fn decimal_from_raw(raw: U256, decimals: u8) -> CoreResult<Decimal> {
    if decimals > MAX_DECIMALS {
        return Err(CoreError::UnsupportedDecimals(decimals));
    }
    let units =
        u128::try_from(raw).map_err(|_| CoreError::AmountOverflow(raw.to_string()))?;
    let units = i128::try_from(units).map_err(|_| CoreError::AmountOverflow(raw.to_string()))?;
    Decimal::try_from_i128_with_scale(units, decimals as u32)
        .map_err(|_| CoreError::AmountOverflow(raw.to_string()))
}

/// Convert a human `Decimal` amount into raw smallest units.
pub fn raw_from_decimal(value: Decimal, decimals: u8, rounding: RawRounding) -> CoreResult<U256> {
    if decimals > MAX_DECIMALS {
        return Err(CoreError::UnsupportedDecimals(decimals));
    }
    if value.is_sign_negative() {
        return Err(CoreError::AmountOverflow(value.to_string()));
    }
    let factor = Decimal::TEN
        .checked_powi(decimals as i64)
        .ok_or(CoreError::UnsupportedDecimals(decimals))?;
    let scaled = value
        .checked_mul(factor)
        .ok_or_else(|| CoreError::AmountOverflow(value.to_string()))?;
    let scaled = match rounding {
        RawRounding::Down => scaled.floor(),
        RawRounding::Up => scaled.ceil(),
    };
    let units = scaled
        .to_u128()
        .ok_or_else(|| CoreError::AmountOverflow(value.to_string()))?;
    Ok(U256::from(units))
}
