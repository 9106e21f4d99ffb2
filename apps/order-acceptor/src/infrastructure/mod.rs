//! Infrastructure Layer
//!
//! Adapters implementing the application ports, plus the JSON-lines replay
//! that drives the acceptor from the binary.

pub mod replay;
pub mod reporting;
pub mod session;
