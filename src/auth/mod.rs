//! Authentication for the Dashboard API.
//!
//! The Dashboard API authenticates every request with a static API key sent
//! in the `X-Cisco-Meraki-API-Key` header.
//!
//! # Overview
//!
//! - [`Authenticator`]: Builds the authentication headers from the configured key
//! - [`AuthError`]: Missing or rejected credential
//! - [`validate_credentials`]: Checks the key against the API
//!
//! # Example
//!
//! ```rust,ignore
//! use meraki_connector::auth::validate_credentials;
//! use meraki_connector::clients::CallExecutor;
//!
//! let executor = CallExecutor::new(&config)?;
//! validate_credentials(&executor).await?;
//! ```

mod authenticator;
mod error;

pub use authenticator::Authenticator;
pub use error::AuthError;

use crate::clients::{CallError, CallExecutor};
use crate::rest::endpoints;

/// Validates the configured API key by listing organizations.
///
/// Exactly one logical call is made. A missing key fails before any request
/// is sent.
///
/// # Errors
///
/// Returns [`CallError::Auth`] with [`AuthError::MissingCredential`] when no
/// key is configured, or with [`AuthError::InvalidCredential`] when the API
/// answers 401. Any other failure of the call is returned unchanged.
pub async fn validate_credentials(executor: &CallExecutor) -> Result<(), CallError> {
    if !executor.authenticator().has_credential() {
        return Err(AuthError::MissingCredential.into());
    }
    executor
        .call(&endpoints::LIST_ORGANIZATIONS, &[], None, Vec::new())
        .await?;
    tracing::debug!("API key validated");
    Ok(())
}
