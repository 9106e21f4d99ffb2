//! Application Layer
//!
//! Orchestrates the domain: ports to the outside world, the services and
//! use cases that answer new-order requests, the MsgType dispatcher and the
//! session lifecycle boundary.

pub mod dispatcher;
pub mod ports;
pub mod services;
pub mod session;
pub mod use_cases;
