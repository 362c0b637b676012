//! Error types for calls to the remote API

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the API client and the session
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Server returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status
        status: StatusCode,
        /// Message taken from the server's error payload
        message: Option<String>,
    },

    /// The response body did not match the expected record shape
    #[error("Failed to decode response from {path}: {message}")]
    Decode {
        /// Request path
        path: String,
        /// Decoder message
        message: String,
    },

    /// Input rejected before any request was sent
    #[error(transparent)]
    Validation(#[from] fm_admin_core::Error),

    /// The credential slot could not be read or written
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    /// Build a status error from a response code and optional server message
    #[must_use]
    pub const fn status(status: StatusCode, message: Option<String>) -> Self {
        Self::Status { status, message }
    }

    /// The server rejected the credential
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }

    /// Message supplied by the server, if any
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Status code of a server rejection
    #[cfg(test)]
    pub(crate) const fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_error_display() {
        let error = ClientError::status(
            StatusCode::UNAUTHORIZED,
            Some("Invalid credentials".to_string()),
        );
        assert_eq!(
            error.to_string(),
            "Server returned 401 Unauthorized: Invalid credentials"
        );
        assert!(error.is_unauthorized());
        assert_eq!(error.server_message(), Some("Invalid credentials"));
        assert_eq!(error.status_code(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_status_error_without_message() {
        let error = ClientError::status(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert!(error.to_string().ends_with("no message"));
        assert!(!error.is_unauthorized());
        assert_eq!(error.server_message(), None);
    }

    #[test]
    fn test_decode_error_display() {
        let error = ClientError::Decode {
            path: "/gallery".to_string(),
            message: "missing field `url`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to decode response from /gallery: missing field `url`"
        );
        assert_eq!(error.status_code(), None);
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let error = ClientError::from(fm_admin_core::Error::Validation {
            field: "username".to_string(),
            message: "Field is required".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "Validation error: username - Field is required"
        );
    }
}
