//! Error types for classification operations

use thiserror::Error;

/// Every way a classification attempt can fail.
///
/// `Parse` and `InvalidRequest` are detected locally and never reach the
/// network. The remaining variants come from the classifier backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("Invalid JSON input: {reason}")]
    Parse { reason: String },

    #[error("Invalid classification request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Failed to encode request: {reason}")]
    Request { reason: String },

    #[error("Network error: {reason}")]
    Transport { reason: String },

    /// Non-success status. Displays as the service-supplied message only.
    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("Malformed response from classifier: {reason}")]
    MalformedResponse { reason: String },

    #[error("Classification cancelled before a response arrived")]
    Cancelled,
}

impl ClassifyError {
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// True when the error was raised before any request left the process.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::InvalidRequest { .. } | Self::Request { .. }
        )
    }
}

/// Result alias used across the classification layers.
pub type ClassifyResult<T> = Result<T, ClassifyError>;
