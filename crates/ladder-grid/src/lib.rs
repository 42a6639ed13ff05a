//! Strategy grid construction and validation.
//!
//! Turns human ladder parameters (price range, mid, amounts, point count)
//! into a tick-aligned geometric distribution of bid/ask offers, and
//! validates that distribution against the exchange's per-order minimums
//! and gas constraints. All of it is pure and synchronous; safe to re-run
//! on every keystroke.

pub mod distribution;
pub mod error;
pub mod form;
pub mod validate;

pub use distribution::{build_distribution, Distribution};
pub use error::{GridError, GridResult};
pub use form::{RawStrategyParams, StrategyFormData, StrategySession, DEFAULT_GASREQ};
pub use validate::{build_and_validate, DensityFailure, ValidationResult};
