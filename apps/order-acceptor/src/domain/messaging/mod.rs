//! Messaging Bounded Context
//!
//! The decoded message model shared with the external session layer.
//! Wire encoding, sequencing, and persistence stay on the session side;
//! the acceptor only sees tag/value maps keyed by a declared [`MsgType`].

mod errors;
mod message;
mod msg_type;
mod session_reject;
pub mod tags;

pub use errors::FieldError;
pub use message::{FieldMap, Message, format_utc_timestamp};
pub use msg_type::MsgType;
pub use session_reject::{SessionReject, SessionRejectReason};
