//! Field access errors.

use thiserror::Error;

use super::session_reject::SessionRejectReason;

/// A required field is absent or its value cannot be used.
///
/// These are per-message, recoverable conditions: the acceptor answers them
/// with a session-level reject and keeps serving the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Required tag is absent or empty.
    #[error("Required tag missing: {tag}")]
    Missing {
        /// Tag number.
        tag: u32,
    },

    /// Value does not parse as the field's data type.
    #[error("Incorrect data format for tag {tag}: '{value}'")]
    Format {
        /// Tag number.
        tag: u32,
        /// Raw value.
        value: String,
    },

    /// Value parses but is not acceptable for the field.
    #[error("Value is incorrect for tag {tag}: '{value}' ({reason})")]
    Invalid {
        /// Tag number.
        tag: u32,
        /// Raw value.
        value: String,
        /// Why the value was refused.
        reason: String,
    },
}

impl FieldError {
    /// Tag the error refers to.
    #[must_use]
    pub const fn tag(&self) -> u32 {
        match self {
            Self::Missing { tag } | Self::Format { tag, .. } | Self::Invalid { tag, .. } => *tag,
        }
    }

    /// Session-level reject reason for this error.
    #[must_use]
    pub const fn reject_reason(&self) -> SessionRejectReason {
        match self {
            Self::Missing { .. } => SessionRejectReason::RequiredTagMissing,
            Self::Format { .. } => SessionRejectReason::IncorrectDataFormat,
            Self::Invalid { .. } => SessionRejectReason::ValueIsIncorrect,
        }
    }
}
