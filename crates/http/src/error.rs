//! Client error types

use thiserror::Error;

/// Errors produced by [`crate::VidyaClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status not covered by a dedicated variant
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Authorization rejected (HTTP 401)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden (HTTP 403)
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (HTTP 404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request (HTTP 400)
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Map an HTTP status code to an error variant.
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// True for HTTP 401 responses, the trigger for a token refresh.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, "expired".into()),
            ClientError::Unauthorized(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, "gone".into()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()),
            ClientError::Server { status: 500, .. }
        ));
    }

    #[test]
    fn unauthorized_detection() {
        let err = ClientError::Unauthorized("token expired".into());
        assert!(err.is_unauthorized());
        let err = ClientError::Forbidden("not yours".into());
        assert!(!err.is_unauthorized());
    }
}
