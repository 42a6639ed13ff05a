//! Strategy configuration form state.
//!
//! `StrategyFormData` is the user's human-denominated input;
//! `RawStrategyParams` is the same thing scaled to raw units for the
//! builder. `StrategySession` owns the form together with its last
//! validation and enforces the stale-on-write invariant: any mutation of
//! the form clears the stored validation synchronously, so a caller can
//! never display a result that does not match current inputs.

use crate::validate::ValidationResult;
use alloy_primitives::U256;
use ladder_core::{raw_from_decimal, CoreResult, Market, Price, RawRounding};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default per-order gas requirement for the reference strategy contract.
pub const DEFAULT_GASREQ: u64 = 250_000;

/// Human-denominated ladder parameters, mutated field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyFormData {
    pub min_price: Decimal,
    pub mid_price: Decimal,
    pub max_price: Decimal,
    pub base_amount: Decimal,
    pub quote_amount: Decimal,
    pub price_points: u32,
    pub step_size: u32,
    /// Skew of the per-point apportionment; 1 means uniform.
    pub factor: Decimal,
    /// Round per-point raw allocations up instead of down.
    pub adjust: bool,
    /// Deposit funds when populating.
    pub deposit: bool,
}

impl Default for StrategyFormData {
    fn default() -> Self {
        Self {
            min_price: Decimal::from(2970),
            mid_price: Decimal::from(3000),
            max_price: Decimal::from(3030),
            base_amount: Decimal::ONE,
            quote_amount: Decimal::from(3000),
            price_points: 10,
            step_size: 2,
            factor: Decimal::ONE,
            adjust: true,
            deposit: true,
        }
    }
}

impl StrategyFormData {
    /// Scale amounts to raw units for the builder. Amount truncation here
    /// rounds down; per-point rounding is governed by `adjust` later.
    pub fn to_raw_params(&self, market: &Market) -> CoreResult<RawStrategyParams> {
        Ok(RawStrategyParams {
            min_price: Price::new(self.min_price),
            mid_price: Price::new(self.mid_price),
            max_price: Price::new(self.max_price),
            base_amount: raw_from_decimal(
                self.base_amount,
                market.base.decimals,
                RawRounding::Down,
            )?,
            quote_amount: raw_from_decimal(
                self.quote_amount,
                market.quote.decimals,
                RawRounding::Down,
            )?,
            price_points: self.price_points,
            step_size: self.step_size,
            factor: self.factor,
            adjust: self.adjust,
            deposit: self.deposit,
            gasreq: DEFAULT_GASREQ,
        })
    }
}

/// Form parameters scaled to raw contract units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStrategyParams {
    pub min_price: Price,
    pub mid_price: Price,
    pub max_price: Price,
    pub base_amount: U256,
    pub quote_amount: U256,
    pub price_points: u32,
    pub step_size: u32,
    pub factor: Decimal,
    pub adjust: bool,
    pub deposit: bool,
    /// Gas each posted offer requires to execute.
    pub gasreq: u64,
}

/// The active configuration session: one form, at most one validation.
#[derive(Debug, Clone, Default)]
pub struct StrategySession {
    form: StrategyFormData,
    validation: Option<ValidationResult>,
}

impl StrategySession {
    pub fn new(form: StrategyFormData) -> Self {
        Self {
            form,
            validation: None,
        }
    }

    pub fn form(&self) -> &StrategyFormData {
        &self.form
    }

    /// Mutable access to the form. Handing out the borrow counts as a
    /// mutation: the stored validation is cleared before the caller can
    /// touch a field.
    pub fn form_mut(&mut self) -> &mut StrategyFormData {
        self.validation = None;
        &mut self.form
    }

    pub fn validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref()
    }

    /// Store a validation computed from the current form.
    pub fn set_validation(&mut self, validation: ValidationResult) {
        self.validation = Some(validation);
    }

    /// Back to defaults, dropping any validation.
    pub fn reset(&mut self) {
        self.form = StrategyFormData::default();
        self.validation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use ladder_core::Token;
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
    fn test_to_raw_params_scales_amounts() {
        let form = StrategyFormData::default();
        let params = form.to_raw_params(&market()).unwrap();
        assert_eq!(params.base_amount, U256::from(10u128.pow(18)));
        assert_eq!(params.quote_amount, U256::from(3000u64) * U256::from(10u64.pow(6)));
        assert_eq!(params.gasreq, DEFAULT_GASREQ);
    }

    #[test]
    fn test_mutation_clears_validation() {
        let mut session = StrategySession::default();
        session.set_validation(ValidationResult::empty_for_tests());
        assert!(session.validation().is_some());

        session.form_mut().mid_price = dec!(3100);
        assert!(session.validation().is_none());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = StrategySession::default();
        session.form_mut().price_points = 42;
        session.set_validation(ValidationResult::empty_for_tests());
        session.reset();
        assert_eq!(session.form().price_points, 10);
        assert!(session.validation().is_none());
    }
}
