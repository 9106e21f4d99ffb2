//! Application Use Cases
//!
//! One use case per outbound answer the acceptor can give.

mod admit_order;
mod reject_malformed;

pub use admit_order::AdmitOrderUseCase;
pub use reject_malformed::RejectMalformedUseCase;
