//! Message Dispatcher
//!
//! Routes inbound application messages by [`MsgType`] to the registered
//! handler:
//!
//! | MsgType | Handler | Effect |
//! |---------|---------|--------|
//! | `D` NewOrderSingle | [`NewOrderHandler`] | execution report, or session reject if malformed |
//! | `8` ExecutionReport | [`ExecutionReportHandler`] | logged only |
//! | anything else | [`DefaultHandler`] | logged only |

use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::{AdmissionEvent, ReportSinkPort, SessionPort};
use crate::application::use_cases::{AdmitOrderUseCase, RejectMalformedUseCase};
use crate::domain::messaging::{Message, MsgType, SessionReject};
use crate::domain::order_admission::{ExecutionReport, NewOrderRequest};
use crate::domain::shared::SessionId;
use crate::error::AcceptorError;

/// What dispatching one message produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// A new-order request was answered with this report.
    Reported(ExecutionReport),
    /// A malformed request was answered with this reject.
    ProtocolRejected(SessionReject),
    /// The message was logged and nothing was sent.
    Observed {
        /// Declared type of the message.
        msg_type: MsgType,
    },
}

impl DispatchOutcome {
    /// True if something was sent back.
    #[must_use]
    pub const fn sent_reply(&self) -> bool {
        !matches!(self, Self::Observed { .. })
    }
}

/// Handles one kind of inbound message.
pub trait MessageHandler: Send + Sync {
    /// Handle `message` received on `session`.
    fn handle(
        &self,
        message: &Message,
        session: &SessionId,
    ) -> Result<DispatchOutcome, AcceptorError>;
}

/// Parses new-order requests and answers them.
pub struct NewOrderHandler<S, R>
where
    S: SessionPort,
    R: ReportSinkPort,
{
    admit: AdmitOrderUseCase<S, R>,
    reject: RejectMalformedUseCase<S, R>,
}

impl<S, R> NewOrderHandler<S, R>
where
    S: SessionPort,
    R: ReportSinkPort,
{
    /// Create a new `NewOrderHandler`.
    pub const fn new(admit: AdmitOrderUseCase<S, R>, reject: RejectMalformedUseCase<S, R>) -> Self {
        Self { admit, reject }
    }
}

impl<S, R> MessageHandler for NewOrderHandler<S, R>
where
    S: SessionPort,
    R: ReportSinkPort,
{
    fn handle(
        &self,
        message: &Message,
        session: &SessionId,
    ) -> Result<DispatchOutcome, AcceptorError> {
        match NewOrderRequest::from_message(message) {
            Ok(request) => {
                tracing::info!(
                    session = %session,
                    cl_ord_id = %request.client_order_id,
                    symbol = %request.symbol,
                    side = %request.side,
                    qty = %request.order_qty,
                    price = ?request.price,
                    "New order received"
                );
                let report = self.admit.execute(&request, session)?;
                Ok(DispatchOutcome::Reported(report))
            }
            Err(error) => {
                let reject = self.reject.execute(message, &error, session)?;
                Ok(DispatchOutcome::ProtocolRejected(reject))
            }
        }
    }
}

/// Logs execution reports sent by the counterparty.
pub struct ExecutionReportHandler<R>
where
    R: ReportSinkPort,
{
    sink: Arc<R>,
}

impl<R> ExecutionReportHandler<R>
where
    R: ReportSinkPort,
{
    /// Create a new `ExecutionReportHandler`.
    pub const fn new(sink: Arc<R>) -> Self {
        Self { sink }
    }
}

impl<R> MessageHandler for ExecutionReportHandler<R>
where
    R: ReportSinkPort,
{
    fn handle(
        &self,
        message: &Message,
        session: &SessionId,
    ) -> Result<DispatchOutcome, AcceptorError> {
        tracing::info!(
            session = %session,
            fields = message.body.len(),
            "Execution report received from counterparty, ignoring"
        );
        self.sink.record(AdmissionEvent::Unhandled {
            session: session.clone(),
            msg_type: message.msg_type.clone(),
        });
        Ok(DispatchOutcome::Observed {
            msg_type: message.msg_type.clone(),
        })
    }
}

/// Logs every message without a dedicated handler.
pub struct DefaultHandler<R>
where
    R: ReportSinkPort,
{
    sink: Arc<R>,
}

impl<R> DefaultHandler<R>
where
    R: ReportSinkPort,
{
    /// Create a new `DefaultHandler`.
    pub const fn new(sink: Arc<R>) -> Self {
        Self { sink }
    }
}

impl<R> MessageHandler for DefaultHandler<R>
where
    R: ReportSinkPort,
{
    fn handle(
        &self,
        message: &Message,
        session: &SessionId,
    ) -> Result<DispatchOutcome, AcceptorError> {
        tracing::info!(
            session = %session,
            msg_type = %message.msg_type,
            "Unhandled message received"
        );
        self.sink.record(AdmissionEvent::Unhandled {
            session: session.clone(),
            msg_type: message.msg_type.clone(),
        });
        Ok(DispatchOutcome::Observed {
            msg_type: message.msg_type.clone(),
        })
    }
}

/// Handlers keyed by message type.
pub struct HandlerRegistry {
    new_order: Box<dyn MessageHandler>,
    execution_report: Box<dyn MessageHandler>,
    default: Box<dyn MessageHandler>,
}

impl HandlerRegistry {
    /// Create a registry from explicit handlers.
    #[must_use]
    pub fn new(
        new_order: Box<dyn MessageHandler>,
        execution_report: Box<dyn MessageHandler>,
        default: Box<dyn MessageHandler>,
    ) -> Self {
        Self {
            new_order,
            execution_report,
            default,
        }
    }

    /// Registry with the standard handlers.
    #[must_use]
    pub fn standard<S, R>(
        admit: AdmitOrderUseCase<S, R>,
        reject: RejectMalformedUseCase<S, R>,
        sink: &Arc<R>,
    ) -> Self
    where
        S: SessionPort + 'static,
        R: ReportSinkPort + 'static,
    {
        Self::new(
            Box::new(NewOrderHandler::new(admit, reject)),
            Box::new(ExecutionReportHandler::new(Arc::clone(sink))),
            Box::new(DefaultHandler::new(Arc::clone(sink))),
        )
    }

    /// Handler for `msg_type`.
    #[must_use]
    pub fn handler_for(&self, msg_type: &MsgType) -> &dyn MessageHandler {
        match msg_type {
            MsgType::NewOrderSingle => self.new_order.as_ref(),
            MsgType::ExecutionReport => self.execution_report.as_ref(),
            _ => self.default.as_ref(),
        }
    }
}

/// Routes inbound application messages.
pub struct MessageDispatcher {
    registry: HandlerRegistry,
}

impl MessageDispatcher {
    /// Create a dispatcher over `registry`.
    #[must_use]
    pub const fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    /// Dispatch `message` received on `session`.
    ///
    /// A malformed new-order request is answered, not returned as an
    /// error. `Err` means an answer could not be delivered.
    pub fn dispatch(
        &self,
        message: &Message,
        session: &SessionId,
    ) -> Result<DispatchOutcome, AcceptorError> {
        self.registry
            .handler_for(&message.msg_type)
            .handle(message, session)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::application::ports::RecordingReportSink;

    struct CountingHandler {
        label: &'static str,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    impl MessageHandler for CountingHandler {
        fn handle(
            &self,
            message: &Message,
            _session: &SessionId,
        ) -> Result<DispatchOutcome, AcceptorError> {
            self.seen.lock().unwrap().push(self.label);
            Ok(DispatchOutcome::Observed {
                msg_type: message.msg_type.clone(),
            })
        }
    }

    fn counting_dispatcher() -> (MessageDispatcher, Arc<Mutex<Vec<&'static str>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let handler = |label| -> Box<dyn MessageHandler> {
            Box::new(CountingHandler {
                label,
                seen: Arc::clone(&seen),
            })
        };
        let registry = HandlerRegistry::new(
            handler("new_order"),
            handler("execution_report"),
            handler("default"),
        );
        (MessageDispatcher::new(registry), seen)
    }

    #[test]
    fn routes_by_msg_type() {
        let (dispatcher, seen) = counting_dispatcher();
        let session = SessionId::new("s-1");

        for msg_type in [
            MsgType::NewOrderSingle,
            MsgType::ExecutionReport,
            MsgType::Other("F".to_string()),
            MsgType::Heartbeat,
        ] {
            dispatcher
                .dispatch(&Message::new(msg_type), &session)
                .unwrap();
        }

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["new_order", "execution_report", "default", "default"]
        );
    }

    #[test]
    fn default_handler_only_observes() {
        let sink = Arc::new(RecordingReportSink::new());
        let handler = DefaultHandler::new(Arc::clone(&sink));

        let outcome = handler
            .handle(
                &Message::new(MsgType::Other("G".to_string())),
                &SessionId::new("s-1"),
            )
            .unwrap();

        assert!(!outcome.sent_reply());
        assert!(matches!(
            sink.events().as_slice(),
            [AdmissionEvent::Unhandled { msg_type: MsgType::Other(t), .. }] if t == "G"
        ));
    }

    #[test]
    fn execution_report_handler_only_observes() {
        let sink = Arc::new(RecordingReportSink::new());
        let handler = ExecutionReportHandler::new(Arc::clone(&sink));

        let outcome = handler
            .handle(
                &Message::new(MsgType::ExecutionReport),
                &SessionId::new("s-1"),
            )
            .unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Observed {
                msg_type: MsgType::ExecutionReport
            }
        );
    }
}
