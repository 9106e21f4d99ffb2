//! Report sink backed by `tracing` and Prometheus counters.

use crate::application::ports::{AdmissionEvent, ReportSinkPort};
use crate::observability;

/// Logs every admission event and counts it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReportSink;

impl TracingReportSink {
    /// Create a new sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportSinkPort for TracingReportSink {
    fn record(&self, event: AdmissionEvent) {
        match event {
            AdmissionEvent::Session { session, event } => {
                observability::record_session_event(event.as_str());
                tracing::debug!(
                    session = %session,
                    event = event.as_str(),
                    "Session event recorded"
                );
            }
            AdmissionEvent::ReportSent { session, report } => {
                let reject_code = report.reject_code.map(|code| code.as_str());
                let exec_type = if report.accepted { "NEW" } else { "REJECTED" };
                observability::record_execution_report(exec_type, reject_code);

                if report.accepted {
                    tracing::info!(
                        session = %session,
                        order_id = %report.order_id,
                        cl_ord_id = %report.client_order_id,
                        symbol = %report.symbol,
                        qty = %report.order_qty,
                        "Order accepted"
                    );
                } else {
                    tracing::info!(
                        session = %session,
                        order_id = %report.order_id,
                        cl_ord_id = %report.client_order_id,
                        symbol = %report.symbol,
                        reject_code = reject_code.unwrap_or_default(),
                        reason = report.reject_text.as_deref().unwrap_or_default(),
                        "Order rejected"
                    );
                }
            }
            AdmissionEvent::ProtocolRejected { session, reject } => {
                observability::record_protocol_reject(reject.reason.as_str());
                tracing::warn!(
                    session = %session,
                    ref_tag_id = reject.ref_tag_id,
                    ref_seq_num = ?reject.ref_seq_num,
                    reason = %reject.reason,
                    text = %reject.text,
                    "Session reject sent"
                );
            }
            AdmissionEvent::DeliveryFailed {
                session,
                msg_type,
                error,
                attempts,
            } => {
                observability::record_delivery_failure(error.kind());
                tracing::error!(
                    session = %session,
                    msg_type = %msg_type,
                    attempts,
                    kind = error.kind(),
                    error = %error,
                    "Outbound message not delivered"
                );
            }
            AdmissionEvent::MessageSent { session, msg_type } => {
                tracing::debug!(
                    session = %session,
                    msg_type = %msg_type,
                    "Message handed to session"
                );
            }
            AdmissionEvent::Unhandled { session, msg_type } => {
                observability::record_unhandled_message(msg_type.metric_label());
                tracing::debug!(session = %session, msg_type = %msg_type, "Message dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{DeliveryError, SessionEvent};
    use crate::domain::messaging::MsgType;
    use crate::domain::shared::SessionId;

    #[test]
    fn records_every_event_kind() {
        let sink = TracingReportSink::new();
        let session = SessionId::new("s-1");

        sink.record(AdmissionEvent::Session {
            session: session.clone(),
            event: SessionEvent::LoggedOn,
        });
        sink.record(AdmissionEvent::Unhandled {
            session: session.clone(),
            msg_type: MsgType::ExecutionReport,
        });
        sink.record(AdmissionEvent::Unhandled {
            session: session.clone(),
            msg_type: MsgType::from_tag_value("XYZ-unbounded"),
        });
        sink.record(AdmissionEvent::MessageSent {
            session: session.clone(),
            msg_type: MsgType::Logon,
        });
        sink.record(AdmissionEvent::DeliveryFailed {
            session: session.clone(),
            msg_type: MsgType::ExecutionReport,
            error: DeliveryError::SessionNotFound { session },
            attempts: 1,
        });
    }
}
