//! Risk Control Bounded Context
//!
//! Static per-instrument limits and the pure validator that applies them.

mod control_table;
mod errors;
mod validator;

pub use control_table::{RiskControlTable, TradingControl};
pub use errors::RiskControlError;
pub use validator::{OrderValidator, REASON_SEPARATOR, ValidationResult};
