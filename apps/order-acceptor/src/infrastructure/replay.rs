//! Session event replay.
//!
//! Drives an [`Acceptor`] from newline-delimited JSON session events, the
//! way a session layer would, and collects what it sends back. Logon and
//! logout are answered with the matching admin message, which passes
//! through `to_admin` first; queued application messages pass through
//! `to_app` once they have been sent.
//!
//! ```text
//! {"session":"FIX.4.4:BROKER->CLIENT","event":"create"}
//! {"session":"FIX.4.4:BROKER->CLIENT","event":"logon"}
//! {"session":"FIX.4.4:BROKER->CLIENT","event":"app","message":{"msg_type":"D",...}}
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::session::InMemorySessionRegistry;
use crate::application::dispatcher::DispatchOutcome;
use crate::application::ports::{OutboundMessage, ReportSinkPort};
use crate::application::session::{Acceptor, SessionApplication};
use crate::domain::messaging::{Message, MsgType};
use crate::domain::shared::SessionId;
use crate::error::AcceptorError;

/// Replay input errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Line is not a valid session event.
    #[error("Invalid session event: {0}")]
    InvalidEvent(#[from] serde_json::Error),

    /// Event requires a message and none was given.
    #[error("Event '{event}' requires a message")]
    MissingMessage {
        /// Event name.
        event: &'static str,
    },
}

/// Kind of session event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEventKind {
    /// Session object created.
    Create,
    /// Logon completed.
    Logon,
    /// Logout completed.
    Logout,
    /// Inbound admin message.
    Admin,
    /// Inbound application message.
    App,
}

impl SessionEventKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Logon => "logon",
            Self::Logout => "logout",
            Self::Admin => "admin",
            Self::App => "app",
        }
    }
}

/// One replayed session event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEventLine {
    /// Session the event belongs to.
    pub session: SessionId,
    /// What happened.
    pub event: SessionEventKind,
    /// Message, for `admin` and `app`.
    #[serde(default)]
    pub message: Option<Message>,
}

/// One message the acceptor sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundLine {
    /// Target session.
    pub session: SessionId,
    /// The message.
    pub message: OutboundMessage,
}

/// Result of applying one event.
#[derive(Debug)]
pub struct ReplayStep {
    /// Dispatch result, for `app` events.
    pub outcome: Option<Result<DispatchOutcome, AcceptorError>>,
    /// Messages sent while handling the event.
    pub outbound: Vec<OutboundLine>,
}

/// Replays session events against an acceptor.
pub struct SessionReplay<R>
where
    R: ReportSinkPort + 'static,
{
    registry: Arc<InMemorySessionRegistry>,
    acceptor: Acceptor<R>,
}

impl<R> SessionReplay<R>
where
    R: ReportSinkPort + 'static,
{
    /// Create a replay over `registry`, which must be the acceptor's
    /// session port.
    pub const fn new(registry: Arc<InMemorySessionRegistry>, acceptor: Acceptor<R>) -> Self {
        Self { registry, acceptor }
    }

    /// Parse and apply one JSON line.
    pub fn apply_line(&self, line: &str) -> Result<ReplayStep, ReplayError> {
        let event: SessionEventLine = serde_json::from_str(line)?;
        self.apply(&event)
    }

    /// Apply one event.
    pub fn apply(&self, event: &SessionEventLine) -> Result<ReplayStep, ReplayError> {
        let session = &event.session;
        let mut outcome = None;

        match event.event {
            SessionEventKind::Create => {
                self.registry.register(session);
                self.acceptor.on_create(session);
            }
            SessionEventKind::Logon => {
                self.acceptor.to_admin(&Message::new(MsgType::Logon), session);
                self.registry.mark_logged_on(session);
                self.acceptor.on_logon(session);
            }
            SessionEventKind::Logout => {
                self.acceptor.to_admin(&Message::new(MsgType::Logout), session);
                self.registry.mark_logged_out(session);
                self.acceptor.on_logout(session);
            }
            SessionEventKind::Admin => {
                let message = Self::require_message(event)?;
                self.acceptor.from_admin(message, session);
            }
            SessionEventKind::App => {
                let message = Self::require_message(event)?;
                outcome = Some(self.acceptor.from_app(message, session));
            }
        }

        let outbound = self
            .registry
            .drain_outbox(session)
            .into_iter()
            .map(|message| {
                self.acceptor.to_app(&message.to_message(), session);
                OutboundLine {
                    session: session.clone(),
                    message,
                }
            })
            .collect();

        Ok(ReplayStep { outcome, outbound })
    }

    fn require_message(event: &SessionEventLine) -> Result<&Message, ReplayError> {
        event.message.as_ref().ok_or(ReplayError::MissingMessage {
            event: event.event.as_str(),
        })
    }
}
