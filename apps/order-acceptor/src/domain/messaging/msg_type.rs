//! Message type (FIX tag 35).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared message type of an inbound or outbound message.
///
/// Known types get their own variant so dispatch is an exhaustive `match`;
/// anything else is carried verbatim in [`MsgType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MsgType {
    /// Heartbeat (`0`).
    Heartbeat,
    /// Test request (`1`).
    TestRequest,
    /// Resend request (`2`).
    ResendRequest,
    /// Session-level reject (`3`).
    Reject,
    /// Sequence reset (`4`).
    SequenceReset,
    /// Logout (`5`).
    Logout,
    /// Execution report (`8`).
    ExecutionReport,
    /// Logon (`A`).
    Logon,
    /// New order single (`D`).
    NewOrderSingle,
    /// Any other message type.
    Other(String),
}

impl MsgType {
    /// Parse from the tag 35 value.
    #[must_use]
    pub fn from_tag_value(value: &str) -> Self {
        match value {
            "0" => Self::Heartbeat,
            "1" => Self::TestRequest,
            "2" => Self::ResendRequest,
            "3" => Self::Reject,
            "4" => Self::SequenceReset,
            "5" => Self::Logout,
            "8" => Self::ExecutionReport,
            "A" => Self::Logon,
            "D" => Self::NewOrderSingle,
            other => Self::Other(other.to_string()),
        }
    }

    /// The tag 35 value.
    #[must_use]
    pub fn as_tag_value(&self) -> &str {
        match self {
            Self::Heartbeat => "0",
            Self::TestRequest => "1",
            Self::ResendRequest => "2",
            Self::Reject => "3",
            Self::SequenceReset => "4",
            Self::Logout => "5",
            Self::ExecutionReport => "8",
            Self::Logon => "A",
            Self::NewOrderSingle => "D",
            Self::Other(value) => value,
        }
    }

    /// Metrics label: the tag value for known types, `"other"` for the rest,
    /// so counterparty-chosen types cannot grow label cardinality.
    #[must_use]
    pub const fn metric_label(&self) -> &'static str {
        match self {
            Self::Heartbeat => "0",
            Self::TestRequest => "1",
            Self::ResendRequest => "2",
            Self::Reject => "3",
            Self::SequenceReset => "4",
            Self::Logout => "5",
            Self::ExecutionReport => "8",
            Self::Logon => "A",
            Self::NewOrderSingle => "D",
            Self::Other(_) => "other",
        }
    }

    /// Returns true for session-level (administrative) message types.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::Heartbeat
                | Self::TestRequest
                | Self::ResendRequest
                | Self::Reject
                | Self::SequenceReset
                | Self::Logout
                | Self::Logon
        )
    }
}

impl From<String> for MsgType {
    fn from(value: String) -> Self {
        Self::from_tag_value(&value)
    }
}

impl From<MsgType> for String {
    fn from(value: MsgType) -> Self {
        value.as_tag_value().to_string()
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag_value())
    }
}
