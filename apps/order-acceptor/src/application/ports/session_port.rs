//! Session Port (Driven Port)
//!
//! The send primitive offered by the external session layer.

use serde::Serialize;

use crate::domain::messaging::{Message, MsgType, SessionReject};
use crate::domain::order_admission::ExecutionReport;
use crate::domain::shared::SessionId;

/// Delivery error from the session layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// No session with this id exists.
    #[error("Session not found: {session}")]
    SessionNotFound { session: SessionId },

    /// Session exists but is not logged on.
    #[error("Session not logged on: {session}")]
    SessionNotLoggedOn { session: SessionId },

    /// Transport refused the message.
    #[error("Transport error on {session}: {message}")]
    Transport { session: SessionId, message: String },
}

impl DeliveryError {
    /// True if a later attempt may succeed.
    ///
    /// An unknown session id will not start resolving by itself; a
    /// logged-out session can log back on.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SessionNotLoggedOn { .. } | Self::Transport { .. })
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SessionNotFound { .. } => "session_not_found",
            Self::SessionNotLoggedOn { .. } => "session_not_logged_on",
            Self::Transport { .. } => "transport",
        }
    }

    /// Session the failed send targeted.
    #[must_use]
    pub const fn session(&self) -> &SessionId {
        match self {
            Self::SessionNotFound { session }
            | Self::SessionNotLoggedOn { session }
            | Self::Transport { session, .. } => session,
        }
    }
}

/// Everything the acceptor ever sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Answer to a parsed new-order request.
    ExecutionReport(ExecutionReport),
    /// Answer to a malformed new-order request.
    SessionReject(SessionReject),
}

impl OutboundMessage {
    /// Declared message type.
    #[must_use]
    pub fn msg_type(&self) -> MsgType {
        match self {
            Self::ExecutionReport(_) => MsgType::ExecutionReport,
            Self::SessionReject(_) => MsgType::Reject,
        }
    }

    /// Field-level view for encoding.
    #[must_use]
    pub fn to_message(&self) -> Message {
        match self {
            Self::ExecutionReport(report) => report.to_message(),
            Self::SessionReject(reject) => reject.to_message(),
        }
    }
}

/// Port for handing messages to the session layer.
///
/// Sending is synchronous: it either completes or fails immediately.
#[cfg_attr(test, mockall::automock)]
pub trait SessionPort: Send + Sync {
    /// Send `message` to the counterparty behind `session`.
    fn send_to_target(
        &self,
        session: &SessionId,
        message: &OutboundMessage,
    ) -> Result<(), DeliveryError>;

    /// False when session state cannot change while a send is being
    /// retried, which makes every retryable error final.
    fn retry_may_succeed(&self) -> bool {
        true
    }
}
