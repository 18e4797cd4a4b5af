//! Authentication error types.

use thiserror::Error;

/// Errors raised while authenticating Dashboard API requests.
///
/// # Example
///
/// ```rust
/// use meraki_connector::auth::AuthError;
///
/// let error = AuthError::InvalidCredential;
/// assert_eq!(error.to_string(), "API key invalid or expired");
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No API key is configured. No request is sent.
    #[error("API key not found in asset configuration")]
    MissingCredential,

    /// The API rejected the key with HTTP 401.
    #[error("API key invalid or expired")]
    InvalidCredential,
}
