//! Error types for the TalkDub client

use talkdub_core::validation::ValidationError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the TalkDub client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned a non-success status code
    ///
    /// Displays the server-provided detail verbatim.
    #[error("{message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// `detail` message from the response body
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request rejected locally, nothing was sent
    #[error("{0}")]
    InvalidRequest(#[from] ValidationError),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if the server refused the request (wrong or expired PIN)
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::ApiError { status: 403, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_detail_verbatim() {
        let err = ClientError::api_error(403, "invalid pin");
        assert_eq!(err.to_string(), "invalid pin");
        assert!(err.is_forbidden());
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_status_classification() {
        assert!(ClientError::api_error(404, "ジョブが見つかりません").is_not_found());
        assert!(ClientError::api_error(500, "boom").is_server_error());
        assert!(!ClientError::ParseError("x".into()).is_client_error());
    }

    #[test]
    fn test_validation_error_passes_through() {
        let err: ClientError = ValidationError::InvalidPin.into();
        assert_eq!(err.to_string(), "6桁のPINを入力してください");
        assert_eq!(err.status(), None);
    }
}
