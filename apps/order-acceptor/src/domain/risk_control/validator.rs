//! Order Validator
//!
//! Checks a new-order request against the instrument's trading control.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::control_table::{RiskControlTable, TradingControl};
use crate::domain::order_admission::{NewOrderRequest, OrdRejReason};

/// Separator between violation clauses in a rejection reason.
pub const REASON_SEPARATOR: &str = " | ";

/// Admission decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationResult {
    /// Order may be admitted.
    Accepted,
    /// Order is refused.
    Rejected {
        /// Human-readable reason; multiple clauses joined by `" | "`.
        reason: String,
        /// Coded reason.
        reject_code: OrdRejReason,
    },
}

impl ValidationResult {
    /// True if the order was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Rejection reason, if rejected.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Accepted => None,
            Self::Rejected { reason, .. } => Some(reason),
        }
    }

    /// Rejection code, if rejected.
    #[must_use]
    pub const fn reject_code(&self) -> Option<OrdRejReason> {
        match self {
            Self::Accepted => None,
            Self::Rejected { reject_code, .. } => Some(*reject_code),
        }
    }
}

#[derive(Debug)]
enum Violation {
    Quantity { qty: Decimal, max: u64 },
    Price { price: Decimal, max: Decimal },
}

impl Violation {
    fn clause(&self) -> String {
        match self {
            Self::Quantity { qty, max } => {
                format!("Max quantity: {qty} exceeded configured: {max}")
            }
            Self::Price { price, max } => {
                format!("Max price: {price} exceeded configured: {max}")
            }
        }
    }
}

/// Validates orders against an immutable [`RiskControlTable`].
///
/// Holds no per-request state, so one instance serves every session and
/// thread.
#[derive(Debug, Clone)]
pub struct OrderValidator {
    table: Arc<RiskControlTable>,
}

impl OrderValidator {
    /// Create a validator over `table`.
    #[must_use]
    pub const fn new(table: Arc<RiskControlTable>) -> Self {
        Self { table }
    }

    /// Validate `request` against the held table.
    #[must_use]
    pub fn validate(&self, request: &NewOrderRequest) -> ValidationResult {
        Self::validate_against(request, &self.table)
    }

    /// Validate `request` against `table`.
    ///
    /// An unknown symbol rejects immediately. Otherwise the quantity and
    /// price checks both run, and every violation contributes a clause.
    /// A request without a price skips the price check.
    #[must_use]
    pub fn validate_against(
        request: &NewOrderRequest,
        table: &RiskControlTable,
    ) -> ValidationResult {
        let Some(control) = table.get(&request.symbol) else {
            return ValidationResult::Rejected {
                reason: format!("Symbol {} not allowed to trade", request.symbol),
                reject_code: OrdRejReason::UnknownSymbol,
            };
        };

        let violations = Self::check_limits(request, control);
        if violations.is_empty() {
            return ValidationResult::Accepted;
        }

        let reject_code = match violations.as_slice() {
            [Violation::Quantity { .. }] => OrdRejReason::IncorrectQuantity,
            [Violation::Price { .. }] => OrdRejReason::PriceExceedsCurrentPriceBand,
            _ => OrdRejReason::OrderExceedsLimit,
        };
        let reason = violations
            .iter()
            .map(Violation::clause)
            .collect::<Vec<_>>()
            .join(REASON_SEPARATOR);

        ValidationResult::Rejected {
            reason,
            reject_code,
        }
    }

    fn check_limits(request: &NewOrderRequest, control: &TradingControl) -> Vec<Violation> {
        let mut violations = Vec::with_capacity(2);

        if request.order_qty >= control.max_qty_decimal() {
            violations.push(Violation::Quantity {
                qty: request.order_qty,
                max: control.max_qty,
            });
        }

        if let Some(price) = request.price {
            if price >= control.max_price {
                violations.push(Violation::Price {
                    price,
                    max: control.max_price,
                });
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_admission::{OrderSide, OrderType, TimeInForce};
    use crate::domain::risk_control::TradingControl;
    use crate::domain::shared::{ClientOrderId, SenderId, Symbol};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn validator() -> OrderValidator {
        let table = RiskControlTable::from_controls([
            TradingControl::new("AAPL", dec!(320.3), 100_000),
            TradingControl::new("GOOG", dec!(220.8), 200_000),
        ])
        .unwrap();
        OrderValidator::new(Arc::new(table))
    }

    fn order(symbol: &str, qty: Decimal, price: Option<Decimal>) -> NewOrderRequest {
        NewOrderRequest {
            client_order_id: ClientOrderId::new("N-1"),
            sender_id: SenderId::new("TRADER1"),
            symbol: Symbol::new(symbol),
            side: OrderSide::Buy,
            order_qty: qty,
            price,
            order_type: if price.is_some() {
                OrderType::Limit
            } else {
                OrderType::Market
            },
            time_in_force: TimeInForce::Day,
            handl_inst: None,
            transact_time: Utc::now(),
        }
    }

    #[test]
    fn within_limits_is_accepted() {
        let result = validator().validate(&order("AAPL", dec!(100), Some(dec!(99.50))));
        assert_eq!(result, ValidationResult::Accepted);
        assert!(result.reason().is_none());
    }

    #[test]
    fn unknown_symbol_is_rejected_without_further_checks() {
        let result = validator().validate(&order("BOZO", dec!(999999999), Some(dec!(1000000))));
        assert_eq!(
            result,
            ValidationResult::Rejected {
                reason: "Symbol BOZO not allowed to trade".to_string(),
                reject_code: OrdRejReason::UnknownSymbol,
            }
        );
    }

    #[test_case(dec!(99999), true ; "one below max")]
    #[test_case(dec!(100000), false ; "equal to max")]
    #[test_case(dec!(100001), false ; "above max")]
    #[test_case(dec!(0), true ; "zero")]
    fn quantity_bound_is_exclusive(qty: Decimal, accepted: bool) {
        let result = validator().validate(&order("AAPL", qty, Some(dec!(99.50))));
        assert_eq!(result.is_accepted(), accepted);
        if !accepted {
            assert_eq!(result.reject_code(), Some(OrdRejReason::IncorrectQuantity));
            assert!(result.reason().unwrap().contains("quantity"));
        }
    }

    #[test_case(dec!(320.29), true ; "just below max")]
    #[test_case(dec!(320.3), false ; "equal to max")]
    #[test_case(dec!(320.30), false ; "equal to max with trailing zero")]
    #[test_case(dec!(400), false ; "above max")]
    fn price_bound_is_exclusive(price: Decimal, accepted: bool) {
        let result = validator().validate(&order("AAPL", dec!(100), Some(price)));
        assert_eq!(result.is_accepted(), accepted);
        if !accepted {
            assert_eq!(
                result.reject_code(),
                Some(OrdRejReason::PriceExceedsCurrentPriceBand)
            );
            assert!(result.reason().unwrap().contains("price"));
        }
    }

    #[test]
    fn both_violations_are_joined() {
        let result = validator().validate(&order("AAPL", dec!(100000), Some(dec!(320.3))));
        assert_eq!(
            result,
            ValidationResult::Rejected {
                reason: "Max quantity: 100000 exceeded configured: 100000 | \
                         Max price: 320.3 exceeded configured: 320.3"
                    .to_string(),
                reject_code: OrdRejReason::OrderExceedsLimit,
            }
        );
    }

    #[test]
    fn missing_price_skips_price_check() {
        let result = validator().validate(&order("AAPL", dec!(100), None));
        assert!(result.is_accepted());
    }

    #[test]
    fn missing_price_still_checks_quantity() {
        let result = validator().validate(&order("GOOG", dec!(200000), None));
        assert_eq!(result.reject_code(), Some(OrdRejReason::IncorrectQuantity));
        assert!(!result.reason().unwrap().contains(REASON_SEPARATOR));
    }

    #[test]
    fn validate_is_pure() {
        let validator = validator();
        let request = order("AAPL", dec!(100000), Some(dec!(1)));
        assert_eq!(validator.validate(&request), validator.validate(&request));
    }
}
