//! Error types for the REST invocation layer.
//!
//! Every anticipated failure of a Dashboard API call is represented as a
//! value of [`CallError`]; nothing below the action boundary panics.
//!
//! # Error Taxonomy
//!
//! - [`CallError::Config`]: unresolved endpoint placeholder or other
//!   configuration fault, raised before any request is sent
//! - [`CallError::Auth`]: missing credential, or HTTP 401
//! - [`CallError::Transport`]: connection, TLS or timeout failure
//! - [`CallError::RateLimited`]: HTTP 429 persisted past the retry budget
//! - [`CallError::Protocol`]: unparseable JSON, unknown content type or an
//!   unexpected payload shape
//! - [`CallError::Business`]: a well-formed error response from the API
//!
//! # Example
//!
//! ```rust,ignore
//! use meraki_connector::clients::CallError;
//!
//! match executor.call(&endpoints::LIST_ORGANIZATIONS, &[], None, Vec::new()).await {
//!     Ok(body) => println!("Organizations: {body:?}"),
//!     Err(CallError::RateLimited { tries }) => println!("Gave up after {tries} tries"),
//!     Err(e) => println!("Status {:?}: {}", e.status_code(), e.message()),
//! }
//! ```

use thiserror::Error;

use crate::auth::AuthError;
use crate::error::ConfigError;

/// Error returned when the HTTP transport itself fails.
///
/// This covers connection refusals, DNS failures, TLS errors and timeouts.
/// No status code is available because no response was received.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable detail from the underlying client.
    pub message: String,
    /// Whether the request timed out.
    pub is_timeout: bool,
    /// Whether the connection could not be established.
    pub is_connect: bool,
}

impl TransportError {
    /// Creates a transport error with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_timeout: false,
            is_connect: false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connect: error.is_connect(),
        }
    }
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// The failure side of a call outcome.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CallError {
    /// Configuration or endpoint-resolution failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Missing or rejected credential.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Request failed local validation.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Error connecting to server. Details: {0}")]
    Transport(#[from] TransportError),

    /// Rate limiting persisted for every allowed attempt.
    #[error("Max retries exceeded for rate limiting ({tries} tries)")]
    RateLimited {
        /// Number of attempts made.
        tries: u32,
    },

    /// The response could not be interpreted.
    #[error("{}", with_status(.status, .message))]
    Protocol {
        /// Status code of the response, when one was received.
        status: Option<u16>,
        /// What was wrong with the response.
        message: String,
    },

    /// The API answered with an error.
    #[error("Status Code: {status}. Error: {message}")]
    Business {
        /// Status code of the response.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },
}

#[allow(clippy::ref_option)]
fn with_status(status: &Option<u16>, message: &str) -> String {
    status.map_or_else(
        || message.to_string(),
        |code| format!("Status Code: {code}. {message}"),
    )
}

impl CallError {
    /// Returns the HTTP status code associated with this failure, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth(AuthError::InvalidCredential) => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::Protocol { status, .. } => *status,
            Self::Business { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the bare failure message, without the status code prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Protocol { message, .. } | Self::Business { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Builds the protocol error for a payload of the wrong shape.
    #[must_use]
    pub fn unexpected_format(status: u16) -> Self {
        Self::Protocol {
            status: Some(status),
            message: "Unexpected response format from server".to_string(),
        }
    }
}
