//! Session error types

use thiserror::Error;
use vidya_http::ClientError;

/// Errors produced by session operations.
///
/// Authentication outcomes are deliberately coarse: callers learn that
/// credentials were rejected or that the session could not be refreshed,
/// never which backend channel or check failed.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Every login channel rejected the credentials
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No refresh token held, or the backend rejected it
    #[error("session refresh failed: {0}")]
    RefreshFailed(String),

    /// Any other transport or server failure, passed through unchanged
    #[error(transparent)]
    Api(#[from] ClientError),
}
