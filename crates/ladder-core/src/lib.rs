//! Core domain types for the ladderbook market-making engine.
//!
//! This crate provides the pure, I/O-free foundation shared by the
//! distribution builder, order book aggregator, and strategy state cache:
//! - `Side`: bid/ask direction, threaded explicitly through every numeric API
//! - `Price`, `Volume`: precision-safe decimal wrappers for human amounts
//! - `Token`, `Market`, `MarketKey`, `BookKey`: market reference data
//! - tick codec: the single source of truth for tick <-> price conversion
//! - `RawOrder`, `HumanOrder`, `DistributionOffer`: order representations

pub mod decimal;
pub mod error;
pub mod market;
pub mod order;
pub mod side;
pub mod tick;
pub mod token;

pub use decimal::{decimal_from_raw, raw_from_decimal, Price, RawRounding, Volume};
pub use error::{CoreError, CoreResult};
pub use market::{BookKey, Market, MarketKey, DEFAULT_PRICE_DISPLAY_DECIMALS};
pub use order::{DistributionOffer, HumanOrder, RawOrder};
pub use side::Side;
pub use tick::{nearest_bin, price_to_tick, tick_to_price, MAX_TICK, MIN_TICK};
pub use token::{cashness, Token};
