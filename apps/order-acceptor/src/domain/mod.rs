//! Domain Layer
//!
//! The innermost layer: message model, order admission types, and risk
//! rules. Nothing here performs I/O.
//!
//! # Bounded Contexts
//!
//! - [`messaging`]: FIX-style message model and session-level rejects
//! - [`order_admission`]: New-order requests and execution reports
//! - [`risk_control`]: Per-instrument limits and order validation

pub mod messaging;
pub mod order_admission;
pub mod risk_control;
pub mod shared;
