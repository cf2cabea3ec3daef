//! Interview service error types.

use thiserror::Error;

/// Failures of a request to the interview service.
///
/// The session controller treats every variant the same way; the variants
/// exist so the log says what actually went wrong.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum InterviewError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("request rejected by interview service ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid response from interview service: {reason}")]
    InvalidResponse { reason: String },

    #[error("response addressed session {actual}, expected {expected}")]
    SessionMismatch { expected: String, actual: String },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl InterviewError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates rejected error.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Creates invalid response error.
    #[must_use]
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Creates invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Returns whether the service answered but the payload was unusable.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidResponse { .. } | Self::SessionMismatch { .. }
        )
    }
}
