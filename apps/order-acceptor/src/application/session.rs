//! Session Lifecycle Adapter
//!
//! The callbacks an external session layer drives. The session layer owns
//! logon, heartbeats, sequencing and wire encoding; the acceptor only
//! observes those and answers application messages.

use std::sync::Arc;

use crate::application::dispatcher::{DispatchOutcome, HandlerRegistry, MessageDispatcher};
use crate::application::ports::{AdmissionEvent, ReportSinkPort, SessionEvent, SessionPort};
use crate::application::services::{
    AvgPxPolicy, DeliveryRetryPolicy, DeliveryService, ExecutionReportBuilder, IdGenerator,
};
use crate::application::use_cases::{AdmitOrderUseCase, RejectMalformedUseCase};
use crate::domain::messaging::{Message, MsgType};
use crate::domain::risk_control::{OrderValidator, RiskControlTable};
use crate::domain::shared::SessionId;
use crate::error::AcceptorError;

/// Callbacks from the session layer.
pub trait SessionApplication: Send + Sync {
    /// A session object was created.
    fn on_create(&self, session: &SessionId);

    /// Logon completed.
    fn on_logon(&self, session: &SessionId);

    /// Logout completed.
    fn on_logout(&self, session: &SessionId);

    /// An admin message is about to be sent.
    fn to_admin(&self, message: &Message, session: &SessionId);

    /// An admin message was received.
    fn from_admin(&self, message: &Message, session: &SessionId);

    /// An application message was handed to the session layer.
    ///
    /// Runs after the send: delivery happens inside [`Self::from_app`].
    fn to_app(&self, message: &Message, session: &SessionId);

    /// An application message was received.
    ///
    /// Admin message types are observed and never dispatched.
    fn from_app(
        &self,
        message: &Message,
        session: &SessionId,
    ) -> Result<DispatchOutcome, AcceptorError>;
}

/// The order acceptor.
pub struct Acceptor<R>
where
    R: ReportSinkPort,
{
    dispatcher: MessageDispatcher,
    sink: Arc<R>,
}

impl<R> Acceptor<R>
where
    R: ReportSinkPort + 'static,
{
    /// Create an acceptor over an assembled dispatcher.
    pub const fn new(dispatcher: MessageDispatcher, sink: Arc<R>) -> Self {
        Self { dispatcher, sink }
    }

    /// Wire the standard risk-gated acceptor.
    pub fn risk_gated<S>(
        table: Arc<RiskControlTable>,
        ids: Arc<IdGenerator>,
        avg_px: AvgPxPolicy,
        retry: DeliveryRetryPolicy,
        session_port: Arc<S>,
        sink: Arc<R>,
    ) -> Self
    where
        S: SessionPort + 'static,
    {
        if table.is_empty() {
            tracing::warn!("No trading controls configured, every order will be rejected");
        }
        let delivery = Arc::new(DeliveryService::new(session_port, retry));
        let admit = AdmitOrderUseCase::new(
            OrderValidator::new(table),
            ExecutionReportBuilder::new(ids, avg_px),
            Arc::clone(&delivery),
            Arc::clone(&sink),
        );
        let reject = RejectMalformedUseCase::new(delivery, Arc::clone(&sink));
        let registry = HandlerRegistry::standard(admit, reject, &sink);
        Self::new(MessageDispatcher::new(registry), sink)
    }

    /// The dispatcher.
    pub const fn dispatcher(&self) -> &MessageDispatcher {
        &self.dispatcher
    }

    fn sent(&self, session: &SessionId, message: &Message) {
        self.sink.record(AdmissionEvent::MessageSent {
            session: session.clone(),
            msg_type: message.msg_type.clone(),
        });
    }

    fn lifecycle(&self, session: &SessionId, event: SessionEvent) {
        self.sink.record(AdmissionEvent::Session {
            session: session.clone(),
            event,
        });
    }
}

impl<R> SessionApplication for Acceptor<R>
where
    R: ReportSinkPort + 'static,
{
    fn on_create(&self, session: &SessionId) {
        tracing::info!(session = %session, "Session created");
        self.lifecycle(session, SessionEvent::Created);
    }

    fn on_logon(&self, session: &SessionId) {
        tracing::info!(session = %session, "Session logged on");
        self.lifecycle(session, SessionEvent::LoggedOn);
    }

    fn on_logout(&self, session: &SessionId) {
        tracing::info!(session = %session, "Session logged out");
        self.lifecycle(session, SessionEvent::LoggedOut);
    }

    fn to_admin(&self, message: &Message, session: &SessionId) {
        tracing::debug!(session = %session, msg_type = %message.msg_type, "Sending admin message");
        self.sent(session, message);
    }

    fn from_admin(&self, message: &Message, session: &SessionId) {
        if message.msg_type == MsgType::Logon {
            tracing::info!(
                session = %session,
                sender = message.sender_comp_id().unwrap_or_default(),
                "Logon message received"
            );
        } else {
            tracing::debug!(
                session = %session,
                msg_type = %message.msg_type,
                "Admin message received"
            );
        }
    }

    fn to_app(&self, message: &Message, session: &SessionId) {
        tracing::debug!(
            session = %session,
            msg_type = %message.msg_type,
            fields = message.body.len(),
            "Application message sent"
        );
        self.sent(session, message);
    }

    fn from_app(
        &self,
        message: &Message,
        session: &SessionId,
    ) -> Result<DispatchOutcome, AcceptorError> {
        if message.msg_type.is_admin() {
            tracing::warn!(
                session = %session,
                msg_type = %message.msg_type,
                "Admin message delivered as application message, ignoring"
            );
            return Ok(DispatchOutcome::Observed {
                msg_type: message.msg_type.clone(),
            });
        }

        self.dispatcher.dispatch(message, session).inspect_err(|error| {
            if error.code().is_per_message() {
                tracing::warn!(
                    session = %session,
                    msg_type = %message.msg_type,
                    code = %error.code(),
                    error = %error,
                    "Failed to answer application message"
                );
            } else {
                tracing::error!(
                    session = %session,
                    msg_type = %message.msg_type,
                    code = %error.code(),
                    error = %error,
                    "Application message failed outside its own scope"
                );
            }
        })
    }
}
