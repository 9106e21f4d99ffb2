//! Shared Kernel
//!
//! Identifier and symbol types used across bounded contexts.

mod identifiers;
mod symbol;

pub use identifiers::{ClientOrderId, ExecId, OrderId, SenderId, SessionId};
pub use symbol::Symbol;
