//! Per-instrument trading controls.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::RiskControlError;
use crate::domain::shared::Symbol;

/// Price and quantity ceilings for one instrument.
///
/// Both bounds are exclusive: an order at exactly `max_price` or
/// `max_qty` is in violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingControl {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Exclusive price ceiling.
    pub max_price: Decimal,
    /// Exclusive quantity ceiling.
    pub max_qty: u64,
}

impl TradingControl {
    /// Create a control.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>, max_price: Decimal, max_qty: u64) -> Self {
        Self {
            symbol: symbol.into(),
            max_price,
            max_qty,
        }
    }

    /// Quantity ceiling as a decimal, for comparison with OrderQty.
    #[must_use]
    pub fn max_qty_decimal(&self) -> Decimal {
        Decimal::from(self.max_qty)
    }
}

/// Immutable symbol → control lookup, built once at startup.
///
/// There is no mutation API; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct RiskControlTable {
    controls: HashMap<Symbol, TradingControl>,
}

impl RiskControlTable {
    /// Build the table, refusing blank symbols, duplicates and non-positive limits.
    pub fn from_controls(
        controls: impl IntoIterator<Item = TradingControl>,
    ) -> Result<Self, RiskControlError> {
        let mut table = HashMap::new();
        for control in controls {
            if control.symbol.is_blank() {
                return Err(RiskControlError::BlankSymbol);
            }
            if control.max_price <= Decimal::ZERO {
                return Err(RiskControlError::NonPositiveLimit {
                    symbol: control.symbol.into_inner(),
                    field: "max_price",
                });
            }
            if control.max_qty == 0 {
                return Err(RiskControlError::NonPositiveLimit {
                    symbol: control.symbol.into_inner(),
                    field: "max_qty",
                });
            }
            if table.contains_key(&control.symbol) {
                return Err(RiskControlError::DuplicateSymbol {
                    symbol: control.symbol.into_inner(),
                });
            }
            table.insert(control.symbol.clone(), control);
        }
        Ok(Self { controls: table })
    }

    /// Control for `symbol`, or `None` if the symbol may not trade.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<&TradingControl> {
        self.controls.get(symbol)
    }

    /// Number of controlled instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// True if no instrument may trade.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Controlled symbols, sorted.
    #[must_use]
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<_> = self.controls.keys().collect();
        symbols.sort();
        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> RiskControlTable {
        RiskControlTable::from_controls([
            TradingControl::new("AAPL", dec!(320.3), 100_000),
            TradingControl::new("MSFT", dec!(350.4), 100_000),
            TradingControl::new("GOOG", dec!(220.8), 200_000),
        ])
        .unwrap()
    }

    #[test]
    fn lookup_hit_and_miss() {
        let table = table();
        let aapl = table.get(&Symbol::new("AAPL")).unwrap();
        assert_eq!(aapl.max_price, dec!(320.3));
        assert_eq!(aapl.max_qty, 100_000);
        assert!(table.get(&Symbol::new("BOZO")).is_none());
        assert!(table.get(&Symbol::new("aapl")).is_none());
    }

    #[test]
    fn symbols_are_sorted() {
        let table = table();
        let symbols: Vec<_> = table.symbols().into_iter().map(Symbol::as_str).collect();
        assert_eq!(symbols, vec!["AAPL", "GOOG", "MSFT"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn duplicate_symbol_is_refused() {
        let err = RiskControlTable::from_controls([
            TradingControl::new("AAPL", dec!(1), 1),
            TradingControl::new("AAPL", dec!(2), 2),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RiskControlError::DuplicateSymbol {
                symbol: "AAPL".to_string()
            }
        );
    }

    #[test]
    fn zero_limits_are_refused() {
        assert!(matches!(
            RiskControlTable::from_controls([TradingControl::new("AAPL", dec!(0), 1)]),
            Err(RiskControlError::NonPositiveLimit {
                field: "max_price",
                ..
            })
        ));
        assert!(matches!(
            RiskControlTable::from_controls([TradingControl::new("AAPL", dec!(1), 0)]),
            Err(RiskControlError::NonPositiveLimit {
                field: "max_qty",
                ..
            })
        ));
    }

    #[test]
    fn blank_symbol_is_refused() {
        assert_eq!(
            RiskControlTable::from_controls([TradingControl::new(" ", dec!(1), 1)]).unwrap_err(),
            RiskControlError::BlankSymbol
        );
    }
}
