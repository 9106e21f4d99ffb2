//! Reject Malformed Use Case
//!
//! Answers an application message that could not be parsed with a
//! session-level `Reject` (MsgType `3`) naming the offending tag.

use std::sync::Arc;

use crate::application::ports::{AdmissionEvent, OutboundMessage, ReportSinkPort, SessionPort};
use crate::application::services::{DeliveryFailure, DeliveryService};
use crate::domain::messaging::{FieldError, Message, SessionReject};
use crate::domain::shared::SessionId;

/// Use case for rejecting a malformed message.
pub struct RejectMalformedUseCase<S, R>
where
    S: SessionPort,
    R: ReportSinkPort,
{
    delivery: Arc<DeliveryService<S>>,
    sink: Arc<R>,
}

impl<S, R> RejectMalformedUseCase<S, R>
where
    S: SessionPort,
    R: ReportSinkPort,
{
    /// Create a new `RejectMalformedUseCase`.
    pub const fn new(delivery: Arc<DeliveryService<S>>, sink: Arc<R>) -> Self {
        Self { delivery, sink }
    }

    /// Reject `message` from `session` because of `error`.
    pub fn execute(
        &self,
        message: &Message,
        error: &FieldError,
        session: &SessionId,
    ) -> Result<SessionReject, DeliveryFailure> {
        let reject = SessionReject::for_field_error(message, error);
        tracing::warn!(
            session = %session,
            ref_msg_type = %reject.ref_msg_type,
            ref_seq_num = ?reject.ref_seq_num,
            ref_tag_id = reject.ref_tag_id,
            reason = %reject.reason,
            "Malformed message rejected"
        );

        let outbound = OutboundMessage::SessionReject(reject.clone());
        match self.delivery.deliver(session, &outbound) {
            Ok(_) => {
                self.sink.record(AdmissionEvent::ProtocolRejected {
                    session: session.clone(),
                    reject: reject.clone(),
                });
                Ok(reject)
            }
            Err(failure) => {
                self.sink.record(AdmissionEvent::DeliveryFailed {
                    session: session.clone(),
                    msg_type: outbound.msg_type(),
                    error: failure.error.clone(),
                    attempts: failure.attempts,
                });
                Err(failure)
            }
        }
    }
}
