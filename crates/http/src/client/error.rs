//! Client error types

use boutique_core::RefreshError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Token refresh failed; the session has been torn down unless the
    /// request suppressed that side effect
    #[error("Token refresh failed: {0}")]
    Refresh(#[from] RefreshError),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether this error means the session can no longer authenticate
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_) | Self::Refresh(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_statuses_to_variants() {
        let cases = [
            (400, "bad"),
            (401, "unauthorized"),
            (403, "forbidden"),
            (404, "missing"),
            (502, "upstream"),
        ];
        for (code, msg) in cases {
            let status = reqwest::StatusCode::from_u16(code).unwrap();
            let err = ClientError::from_status(status, msg.to_string());
            match code {
                400 => assert!(matches!(err, ClientError::BadRequest(_))),
                401 => assert!(matches!(err, ClientError::AuthenticationFailed(_))),
                403 => assert!(matches!(err, ClientError::Forbidden(_))),
                404 => assert!(matches!(err, ClientError::NotFound(_))),
                _ => assert!(matches!(err, ClientError::ServerError { status: 502, .. })),
            }
        }
    }

    #[test]
    fn auth_expiry_covers_refresh_failures() {
        assert!(ClientError::AuthenticationFailed("x".into()).is_auth_expired());
        assert!(ClientError::Refresh(RefreshError::MissingRefreshToken).is_auth_expired());
        assert!(!ClientError::NotFound("x".into()).is_auth_expired());
    }
}
