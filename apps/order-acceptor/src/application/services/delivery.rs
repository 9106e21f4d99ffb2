//! Outbound delivery with bounded retry.

use std::sync::Arc;

use crate::application::ports::{DeliveryError, OutboundMessage, SessionPort};
use crate::domain::shared::SessionId;

use super::retry::{DeliveryRetryPolicy, ExponentialBackoffCalculator};

/// A send that failed for good.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error} (after {attempts} attempt(s))")]
pub struct DeliveryFailure {
    /// Last error from the session layer.
    pub error: DeliveryError,
    /// Send attempts made.
    pub attempts: u32,
}

/// Sends outbound messages, retrying retryable errors.
///
/// A message is handed to the session layer at most once successfully:
/// the loop stops on the first `Ok`.
pub struct DeliveryService<S>
where
    S: SessionPort,
{
    session_port: Arc<S>,
    policy: DeliveryRetryPolicy,
}

impl<S> DeliveryService<S>
where
    S: SessionPort,
{
    /// Create a new `DeliveryService`.
    pub const fn new(session_port: Arc<S>, policy: DeliveryRetryPolicy) -> Self {
        Self {
            session_port,
            policy,
        }
    }

    /// Send `message` to `session`.
    ///
    /// Returns the number of attempts it took. Blocks the calling thread
    /// for the backoff between attempts, so a retry only helps when another
    /// thread can fix the session meanwhile. Ports that report
    /// [`SessionPort::retry_may_succeed`] as false get a single attempt.
    pub fn deliver(
        &self,
        session: &SessionId,
        message: &OutboundMessage,
    ) -> Result<u32, DeliveryFailure> {
        let mut backoff = ExponentialBackoffCalculator::new(&self.policy);
        let mut attempts = 0;

        loop {
            attempts += 1;
            let error = match self.session_port.send_to_target(session, message) {
                Ok(()) => return Ok(attempts),
                Err(error) => error,
            };

            if !error.is_retryable() || !self.session_port.retry_may_succeed() {
                return Err(DeliveryFailure { error, attempts });
            }

            let Some(delay) = backoff.next_backoff() else {
                return Err(DeliveryFailure { error, attempts });
            };

            tracing::warn!(
                session = %session,
                msg_type = %message.msg_type(),
                attempt = attempts,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Delivery failed, retrying"
            );
            std::thread::sleep(delay);
        }
    }
}
