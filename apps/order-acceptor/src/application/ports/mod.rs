//! Application Ports (Driven)
//!
//! Interfaces the acceptor uses to reach the outside world:
//! - [`SessionPort`]: send to a counterparty session
//! - [`ReportSinkPort`]: report what happened to operators

mod report_sink_port;
mod session_port;

pub use report_sink_port::{
    AdmissionEvent, NoOpReportSink, RecordingReportSink, ReportSinkPort, ReportSummary,
    SessionEvent,
};
#[cfg(test)]
pub use session_port::MockSessionPort;
pub use session_port::{DeliveryError, OutboundMessage, SessionPort};
