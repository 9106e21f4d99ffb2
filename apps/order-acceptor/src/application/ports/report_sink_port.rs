//! Report Sink Port (Driven Port)
//!
//! Where the acceptor reports what it did. Replaces process-global logging
//! calls in the request path with an injected dependency.

use std::sync::Mutex;

use rust_decimal::Decimal;

use super::session_port::DeliveryError;
use crate::domain::messaging::{MsgType, SessionReject};
use crate::domain::order_admission::{ExecutionReport, OrdRejReason};
use crate::domain::shared::{ClientOrderId, OrderId, SessionId, Symbol};

/// Session lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Session object created by the session layer.
    Created,
    /// Logon completed.
    LoggedOn,
    /// Logout completed.
    LoggedOut,
}

impl SessionEvent {
    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::LoggedOn => "logged_on",
            Self::LoggedOut => "logged_out",
        }
    }
}

/// Summary of a sent execution report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// OrderID.
    pub order_id: OrderId,
    /// ClOrdID.
    pub client_order_id: ClientOrderId,
    /// Symbol.
    pub symbol: Symbol,
    /// OrderQty.
    pub order_qty: Decimal,
    /// True for `ExecType::New`.
    pub accepted: bool,
    /// Reject code, rejections only.
    pub reject_code: Option<OrdRejReason>,
    /// Reject text, rejections only.
    pub reject_text: Option<String>,
}

impl From<&ExecutionReport> for ReportSummary {
    fn from(report: &ExecutionReport) -> Self {
        Self {
            order_id: report.order_id.clone(),
            client_order_id: report.client_order_id.clone(),
            symbol: report.symbol.clone(),
            order_qty: report.order_qty,
            accepted: report.is_accepted(),
            reject_code: report.reject_code,
            reject_text: report.reject_text.clone(),
        }
    }
}

/// Something the acceptor did that an operator may care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionEvent {
    /// Session lifecycle notification received.
    Session {
        /// Session.
        session: SessionId,
        /// What happened.
        event: SessionEvent,
    },
    /// Execution report delivered.
    ReportSent {
        /// Session.
        session: SessionId,
        /// Report summary.
        report: ReportSummary,
    },
    /// Session-level reject delivered for a malformed request.
    ProtocolRejected {
        /// Session.
        session: SessionId,
        /// Reject sent.
        reject: SessionReject,
    },
    /// Outbound message could not be delivered after all attempts.
    DeliveryFailed {
        /// Session.
        session: SessionId,
        /// Type of the undelivered message.
        msg_type: MsgType,
        /// Last error.
        error: DeliveryError,
        /// Attempts made.
        attempts: u32,
    },
    /// Outbound message handed to the session layer.
    MessageSent {
        /// Session.
        session: SessionId,
        /// Type of the message.
        msg_type: MsgType,
    },
    /// Application message with no dedicated handling.
    Unhandled {
        /// Session.
        session: SessionId,
        /// Declared type.
        msg_type: MsgType,
    },
}

/// Port for reporting admission events.
pub trait ReportSinkPort: Send + Sync {
    /// Record one event.
    fn record(&self, event: AdmissionEvent);
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReportSink;

impl ReportSinkPort for NoOpReportSink {
    fn record(&self, _event: AdmissionEvent) {}
}

/// Sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingReportSink {
    events: Mutex<Vec<AdmissionEvent>>,
}

impl RecordingReportSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<AdmissionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl ReportSinkPort for RecordingReportSink {
    fn record(&self, event: AdmissionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingReportSink::new();
        sink.record(AdmissionEvent::Session {
            session: SessionId::new("s-1"),
            event: SessionEvent::Created,
        });
        sink.record(AdmissionEvent::Session {
            session: SessionId::new("s-1"),
            event: SessionEvent::LoggedOn,
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[1],
            AdmissionEvent::Session {
                event: SessionEvent::LoggedOn,
                ..
            }
        ));
    }

    #[test]
    fn no_op_sink_accepts_events() {
        NoOpReportSink.record(AdmissionEvent::Unhandled {
            session: SessionId::new("s-1"),
            msg_type: MsgType::Heartbeat,
        });
    }
}
