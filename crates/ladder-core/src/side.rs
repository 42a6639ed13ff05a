//! Order direction.
//!
//! Direction changes the numeric interpretation of a tick (which token is
//! outbound), so every codec/builder/aggregator signature takes it
//! explicitly instead of a loose string tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the book an order rests on.
///
/// For an ask the outbound token is base (selling base for quote); for a
/// bid the outbound token is quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub fn is_bid(&self) -> bool {
        matches!(self, Self::Bid)
    }

    pub fn is_ask(&self) -> bool {
        matches!(self, Self::Ask)
    }

    /// The opposite side (the "dual" reposted after a fill).
    pub fn opposite(&self) -> Self {
        match self {
            Self::Bid => Self::Ask,
            Self::Ask => Self::Bid,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bid => write!(f, "BID"),
            Self::Ask => write!(f, "ASK"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn test_display() {
        assert_eq!(Side::Bid.to_string(), "BID");
        assert_eq!(Side::Ask.to_string(), "ASK");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Bid).unwrap(), "\"bid\"");
        assert_eq!(serde_json::from_str::<Side>("\"ask\"").unwrap(), Side::Ask);
    }
}
