//! Session-level reject (MsgType `3`).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::FieldError;
use super::message::Message;
use super::msg_type::MsgType;
use super::tags;

/// SessionRejectReason (tag 373) values the acceptor emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionRejectReason {
    /// Required tag missing (`1`).
    RequiredTagMissing,
    /// Value is incorrect (out of range) for this tag (`5`).
    ValueIsIncorrect,
    /// Incorrect data format for value (`6`).
    IncorrectDataFormat,
}

impl SessionRejectReason {
    /// Numeric tag 373 value.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::RequiredTagMissing => 1,
            Self::ValueIsIncorrect => 5,
            Self::IncorrectDataFormat => 6,
        }
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RequiredTagMissing => "REQUIRED_TAG_MISSING",
            Self::ValueIsIncorrect => "VALUE_IS_INCORRECT",
            Self::IncorrectDataFormat => "INCORRECT_DATA_FORMAT",
        }
    }
}

impl fmt::Display for SessionRejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Protocol-level rejection of an inbound message that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReject {
    /// MsgSeqNum of the rejected message, when the header carried one.
    pub ref_seq_num: Option<u64>,
    /// Offending tag.
    pub ref_tag_id: u32,
    /// MsgType of the rejected message.
    pub ref_msg_type: MsgType,
    /// Coded reason.
    pub reason: SessionRejectReason,
    /// Free text.
    pub text: String,
}

impl SessionReject {
    /// Build a reject for `message` from the field error that stopped parsing.
    #[must_use]
    pub fn for_field_error(message: &Message, error: &FieldError) -> Self {
        Self {
            ref_seq_num: message.seq_num(),
            ref_tag_id: error.tag(),
            ref_msg_type: message.msg_type.clone(),
            reason: error.reject_reason(),
            text: error.to_string(),
        }
    }

    /// Field-level view for the session layer to encode.
    #[must_use]
    pub fn to_message(&self) -> Message {
        let mut message = Message::new(MsgType::Reject)
            .with_field(tags::REF_TAG_ID, self.ref_tag_id.to_string())
            .with_field(tags::REF_MSG_TYPE, self.ref_msg_type.as_tag_value())
            .with_field(tags::SESSION_REJECT_REASON, self.reason.code().to_string())
            .with_field(tags::TEXT, self.text.clone());
        if let Some(seq) = self.ref_seq_num {
            message.body.set(tags::REF_SEQ_NUM, seq.to_string());
        }
        message
    }
}
