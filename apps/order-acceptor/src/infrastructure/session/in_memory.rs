//! In-memory session registry.
//!
//! Stands in for the external session layer: tracks which sessions exist
//! and are logged on, and queues what the acceptor sends to each.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use crate::application::ports::{DeliveryError, OutboundMessage, SessionPort};
use crate::domain::shared::SessionId;

/// Lifecycle state of a registered session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, not yet logged on.
    Created,
    /// Logged on; sends succeed.
    LoggedOn,
    /// Logged out; sends fail until the next logon.
    LoggedOut,
}

#[derive(Debug)]
struct SessionEntry {
    state: SessionState,
    outbox: VecDeque<OutboundMessage>,
}

/// Session registry backed by a map of outboxes.
#[derive(Debug, Default)]
pub struct InMemorySessionRegistry {
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
    sequential: bool,
}

impl InMemorySessionRegistry {
    /// Create an empty registry whose state other threads may change.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry driven from the same thread that sends.
    ///
    /// Logon can only happen between sends, so delivery does not retry a
    /// session that is not logged on.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            sequential: true,
            ..Self::default()
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, SessionEntry>> {
        self.sessions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Register `session` in the `Created` state. Re-registering keeps the
    /// existing state and outbox.
    pub fn register(&self, session: &SessionId) {
        self.lock()
            .entry(session.clone())
            .or_insert_with(|| SessionEntry {
                state: SessionState::Created,
                outbox: VecDeque::new(),
            });
    }

    /// Mark `session` logged on, registering it if needed.
    pub fn mark_logged_on(&self, session: &SessionId) {
        self.set_state(session, SessionState::LoggedOn);
    }

    /// Mark `session` logged out, registering it if needed.
    pub fn mark_logged_out(&self, session: &SessionId) {
        self.set_state(session, SessionState::LoggedOut);
    }

    fn set_state(&self, session: &SessionId, state: SessionState) {
        self.lock()
            .entry(session.clone())
            .or_insert_with(|| SessionEntry {
                state,
                outbox: VecDeque::new(),
            })
            .state = state;
    }

    /// Current state of `session`.
    #[must_use]
    pub fn state(&self, session: &SessionId) -> Option<SessionState> {
        self.lock().get(session).map(|entry| entry.state)
    }

    /// Take every message queued for `session`, oldest first.
    #[must_use]
    pub fn drain_outbox(&self, session: &SessionId) -> Vec<OutboundMessage> {
        self.lock()
            .get_mut(session)
            .map(|entry| entry.outbox.drain(..).collect())
            .unwrap_or_default()
    }

    /// Number of messages queued for `session`.
    #[must_use]
    pub fn pending(&self, session: &SessionId) -> usize {
        self.lock()
            .get(session)
            .map_or(0, |entry| entry.outbox.len())
    }
}

impl SessionPort for InMemorySessionRegistry {
    fn send_to_target(
        &self,
        session: &SessionId,
        message: &OutboundMessage,
    ) -> Result<(), DeliveryError> {
        let mut sessions = self.lock();
        let Some(entry) = sessions.get_mut(session) else {
            return Err(DeliveryError::SessionNotFound {
                session: session.clone(),
            });
        };
        if entry.state != SessionState::LoggedOn {
            return Err(DeliveryError::SessionNotLoggedOn {
                session: session.clone(),
            });
        }
        entry.outbox.push_back(message.clone());
        Ok(())
    }

    fn retry_may_succeed(&self) -> bool {
        !self.sequential
    }
}
