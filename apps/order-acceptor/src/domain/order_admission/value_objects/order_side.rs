//! Order side (buy or sell).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (FIX tag 54).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy order (`1`).
    Buy,
    /// Sell order (`2`).
    Sell,
}

impl OrderSide {
    /// Parse from the tag 54 value.
    #[must_use]
    pub const fn from_fix(code: char) -> Option<Self> {
        match code {
            '1' => Some(Self::Buy),
            '2' => Some(Self::Sell),
            _ => None,
        }
    }

    /// The tag 54 value.
    #[must_use]
    pub const fn fix_code(&self) -> char {
        match self {
            Self::Buy => '1',
            Self::Sell => '2',
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}
