//! Order type (market, limit, etc.).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order type (FIX tag 40).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Market order (`1`).
    Market,
    /// Limit order (`2`).
    Limit,
    /// Stop order (`3`).
    Stop,
    /// Stop-limit order (`4`).
    StopLimit,
}

impl OrderType {
    /// Parse from the tag 40 value.
    #[must_use]
    pub const fn from_fix(code: char) -> Option<Self> {
        match code {
            '1' => Some(Self::Market),
            '2' => Some(Self::Limit),
            '3' => Some(Self::Stop),
            '4' => Some(Self::StopLimit),
            _ => None,
        }
    }

    /// Returns true if this order type must carry Price (tag 44).
    #[must_use]
    pub const fn requires_price(&self) -> bool {
        matches!(self, Self::Limit | Self::StopLimit)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "MARKET"),
            Self::Limit => write!(f, "LIMIT"),
            Self::Stop => write!(f, "STOP"),
            Self::StopLimit => write!(f, "STOP_LIMIT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_type_requires_price() {
        assert!(!OrderType::Market.requires_price());
        assert!(OrderType::Limit.requires_price());
        assert!(!OrderType::Stop.requires_price());
        assert!(OrderType::StopLimit.requires_price());
    }

    #[test]
    fn order_type_from_fix() {
        assert_eq!(OrderType::from_fix('1'), Some(OrderType::Market));
        assert_eq!(OrderType::from_fix('2'), Some(OrderType::Limit));
        assert_eq!(OrderType::from_fix('P'), None);
    }

    #[test]
    fn order_type_display() {
        assert_eq!(format!("{}", OrderType::StopLimit), "STOP_LIMIT");
    }
}
