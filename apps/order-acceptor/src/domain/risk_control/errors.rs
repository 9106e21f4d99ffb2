//! Risk control table errors.

use thiserror::Error;

/// Errors building a [`super::RiskControlTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiskControlError {
    /// Same symbol configured twice.
    #[error("Duplicate trading control for symbol {symbol}")]
    DuplicateSymbol {
        /// Symbol.
        symbol: String,
    },

    /// Empty or whitespace symbol.
    #[error("Trading control symbol must not be blank")]
    BlankSymbol,

    /// Limit of zero (or less) would reject everything.
    #[error("Trading control {field} for {symbol} must be positive")]
    NonPositiveLimit {
        /// Symbol.
        symbol: String,
        /// Offending field.
        field: &'static str,
    },
}
