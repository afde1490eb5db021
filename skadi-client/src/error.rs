//! Error types for the skadi client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the skadi server
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, unreadable body)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The server rejected the agent token
    #[error("invalid token")]
    Unauthorized,

    /// API returned an unexpected status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request (bad server address, bad token characters)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if the server rejected the credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if the request ran past the client timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RequestFailed(e) if e.is_timeout())
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        self.is_unauthorized()
            || matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
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
    fn test_status_classification() {
        assert!(ClientError::api_error(503, "down").is_server_error());
        assert!(!ClientError::api_error(503, "down").is_client_error());
        assert!(ClientError::api_error(404, "gone").is_client_error());
        assert!(ClientError::Unauthorized.is_client_error());
        assert!(ClientError::Unauthorized.is_unauthorized());
        assert!(!ClientError::ParseError("eof".into()).is_timeout());
    }

    #[test]
    fn test_display() {
        assert_eq!(ClientError::Unauthorized.to_string(), "invalid token");
        assert_eq!(
            ClientError::api_error(500, "boom").to_string(),
            "API error (status 500): boom"
        );
    }
}
