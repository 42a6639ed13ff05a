//! Deployed-strategy session state.
//!
//! Tracks the set of known strategy contracts, caches their last read
//! snapshot, and funnels every re-read through a coalescing refresh so
//! concurrent callers share a single chain round trip. Lifecycle writes
//! (deploy, populate, retract) go through here too, so a confirmed
//! transaction is always followed by a fresh snapshot.

pub mod cache;
pub mod error;

pub use cache::{LoadState, StrategyCache, StrategyEntry};
pub use error::{StateError, StateResult};
