//! Application Services
//!
//! Helpers shared by the use cases: identifier generation, report
//! construction and outbound delivery.

mod delivery;
mod id_generator;
mod report_builder;
mod retry;

pub use delivery::{DeliveryFailure, DeliveryService};
pub use id_generator::IdGenerator;
pub use report_builder::{AvgPxPolicy, ExecutionReportBuilder};
pub use retry::{DeliveryRetryPolicy, ExponentialBackoffCalculator};
