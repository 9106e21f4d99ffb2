//! Execution report status fields: ExecType (150), OrdStatus (39),
//! OrdRejReason (103).

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to the order (FIX tag 150).
///
/// Admission only ever produces the two outcomes below; fills, cancels and
/// replaces belong to a matching engine this acceptor does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecType {
    /// Order admitted (`0`).
    New,
    /// Order refused (`8`).
    Rejected,
}

impl ExecType {
    /// The tag 150 value.
    #[must_use]
    pub const fn fix_code(&self) -> char {
        match self {
            Self::New => '0',
            Self::Rejected => '8',
        }
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ExecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current order state (FIX tag 39).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrdStatus {
    /// Working, nothing filled (`0`).
    New,
    /// Refused (`8`).
    Rejected,
}

impl OrdStatus {
    /// The tag 39 value.
    #[must_use]
    pub const fn fix_code(&self) -> char {
        match self {
            Self::New => '0',
            Self::Rejected => '8',
        }
    }
}

impl From<ExecType> for OrdStatus {
    fn from(exec_type: ExecType) -> Self {
        match exec_type {
            ExecType::New => Self::New,
            ExecType::Rejected => Self::Rejected,
        }
    }
}

impl fmt::Display for OrdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Coded reason for a business rejection (FIX tag 103).
///
/// Each validator violation category maps to its own code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrdRejReason {
    /// Symbol not in the control table (`1`).
    UnknownSymbol,
    /// More than one limit breached at once (`3`).
    OrderExceedsLimit,
    /// Quantity at or above the configured maximum (`13`).
    IncorrectQuantity,
    /// Price at or above the configured maximum (`16`).
    PriceExceedsCurrentPriceBand,
    /// Anything else (`99`).
    Other,
}

impl OrdRejReason {
    /// Numeric tag 103 value.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::UnknownSymbol => 1,
            Self::OrderExceedsLimit => 3,
            Self::IncorrectQuantity => 13,
            Self::PriceExceedsCurrentPriceBand => 16,
            Self::Other => 99,
        }
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownSymbol => "UNKNOWN_SYMBOL",
            Self::OrderExceedsLimit => "ORDER_EXCEEDS_LIMIT",
            Self::IncorrectQuantity => "INCORRECT_QUANTITY",
            Self::PriceExceedsCurrentPriceBand => "PRICE_EXCEEDS_CURRENT_PRICE_BAND",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for OrdRejReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ord_status_follows_exec_type() {
        assert_eq!(OrdStatus::from(ExecType::New), OrdStatus::New);
        assert_eq!(OrdStatus::from(ExecType::Rejected), OrdStatus::Rejected);
    }

    #[test]
    fn fix_codes() {
        assert_eq!(ExecType::New.fix_code(), '0');
        assert_eq!(ExecType::Rejected.fix_code(), '8');
        assert_eq!(OrdStatus::Rejected.fix_code(), '8');
    }

    #[test]
    fn reject_codes_are_distinct() {
        let codes = [
            OrdRejReason::UnknownSymbol,
            OrdRejReason::OrderExceedsLimit,
            OrdRejReason::IncorrectQuantity,
            OrdRejReason::PriceExceedsCurrentPriceBand,
            OrdRejReason::Other,
        ]
        .map(|r| r.code());
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn reject_reason_serde() {
        let json = serde_json::to_string(&OrdRejReason::UnknownSymbol).unwrap();
        assert_eq!(json, "\"UNKNOWN_SYMBOL\"");
    }
}
