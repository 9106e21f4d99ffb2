//! Order Admission Value Objects
//!
//! Immutable FIX enumerations with their on-the-wire codes.

mod handl_inst;
mod order_side;
mod order_type;
mod report_status;
mod time_in_force;

pub use handl_inst::HandlInst;
pub use order_side::OrderSide;
pub use order_type::OrderType;
pub use report_status::{ExecType, OrdRejReason, OrdStatus};
pub use time_in_force::TimeInForce;
