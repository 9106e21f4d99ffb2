//! Order Admission Bounded Context
//!
//! The inbound NewOrderSingle and the execution report that answers it.
//!
//! # Key Concepts
//!
//! - **One report per request**: every parsed request ends in exactly one
//!   `ExecutionReport`, either `New` or `Rejected`
//! - **Admission only**: `LeavesQty = OrderQty`, `CumQty = 0`; nothing fills here

mod execution_report;
mod new_order;
pub mod value_objects;

pub use execution_report::ExecutionReport;
pub use new_order::NewOrderRequest;
pub use value_objects::{
    ExecType, HandlInst, OrdRejReason, OrdStatus, OrderSide, OrderType, TimeInForce,
};
