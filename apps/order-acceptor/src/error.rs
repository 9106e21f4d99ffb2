//! Rich error handling for the order acceptor.
//!
//! Per-concern errors ([`FieldError`], [`DeliveryFailure`],
//! [`RiskControlError`], [`ConfigError`]) convert into [`AcceptorError`],
//! which carries a stable [`ErrorCode`] and key/value context for operators.
//!
//! | Code | Source | Usage |
//! |------|--------|-------|
//! | `INVALID_MESSAGE` | `FieldError` | Required tag missing or unparseable |
//! | `SESSION_NOT_FOUND` | `DeliveryError` | Send target unknown to the session layer |
//! | `DELIVERY_FAILED` | `DeliveryError` | Retries exhausted |
//! | `INVALID_RISK_CONTROL` | `RiskControlError` | Control table rejected at load |
//! | `INVALID_CONFIG` | `ConfigError` | Configuration unreadable or invalid |
//! | `INTERNAL_ERROR` | | Unexpected condition |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::DeliveryError;
use crate::application::services::DeliveryFailure;
use crate::config::ConfigError;
use crate::domain::messaging::FieldError;
use crate::domain::risk_control::RiskControlError;

/// Error codes for the order acceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Inbound message is malformed.
    InvalidMessage,
    /// Send target is unknown.
    SessionNotFound,
    /// Outbound message could not be delivered.
    DeliveryFailed,
    /// Risk control table is invalid.
    InvalidRiskControl,
    /// Configuration is invalid.
    InvalidConfig,
}

impl ErrorCode {
    /// Stable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidMessage => "INVALID_MESSAGE",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::DeliveryFailed => "DELIVERY_FAILED",
            Self::InvalidRiskControl => "INVALID_RISK_CONTROL",
            Self::InvalidConfig => "INVALID_CONFIG",
        }
    }

    /// True if the condition concerns one message, not the process.
    #[must_use]
    pub const fn is_per_message(&self) -> bool {
        matches!(
            self,
            Self::InvalidMessage | Self::SessionNotFound | Self::DeliveryFailed
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A rich error with context for the order acceptor.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct AcceptorError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl AcceptorError {
    /// Create a new acceptor error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Look up one context value.
    #[must_use]
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl From<FieldError> for AcceptorError {
    fn from(error: FieldError) -> Self {
        Self::new(ErrorCode::InvalidMessage, error.to_string())
            .with_context("tag", error.tag().to_string())
            .with_context("reason", error.reject_reason().as_str())
    }
}

impl From<DeliveryError> for AcceptorError {
    fn from(error: DeliveryError) -> Self {
        let code = match error {
            DeliveryError::SessionNotFound { .. } => ErrorCode::SessionNotFound,
            DeliveryError::SessionNotLoggedOn { .. } | DeliveryError::Transport { .. } => {
                ErrorCode::DeliveryFailed
            }
        };
        Self::new(code, error.to_string())
            .with_context("session", error.session().as_str())
            .with_context("kind", error.kind())
    }
}

impl From<DeliveryFailure> for AcceptorError {
    fn from(failure: DeliveryFailure) -> Self {
        let attempts = failure.attempts;
        Self::from(failure.error).with_context("attempts", attempts.to_string())
    }
}

impl From<RiskControlError> for AcceptorError {
    fn from(error: RiskControlError) -> Self {
        Self::new(ErrorCode::InvalidRiskControl, error.to_string())
    }
}

impl From<ConfigError> for AcceptorError {
    fn from(error: ConfigError) -> Self {
        Self::new(ErrorCode::InvalidConfig, error.to_string())
    }
}
