//! Request header construction for API-key authentication.

use crate::auth::AuthError;
use crate::clients::constants::AUTH_HEADER;
use crate::clients::HeaderSet;
use crate::config::{ApiKey, ConnectorConfig};

/// Produces the authentication headers for every Dashboard API request.
///
/// The key is read-only after construction and is never logged; the `Debug`
/// output masks it.
///
/// # Example
///
/// ```rust
/// use meraki_connector::auth::Authenticator;
/// use meraki_connector::{ApiKey, ConnectorConfig};
///
/// let config = ConnectorConfig::builder()
///     .api_key(ApiKey::new("secret").unwrap())
///     .build()
///     .unwrap();
///
/// let headers = Authenticator::from_config(&config).headers().unwrap();
/// assert_eq!(headers["X-Cisco-Meraki-API-Key"], "secret");
/// assert_eq!(headers["Accept"], "application/json");
/// ```
#[derive(Clone, Debug)]
pub struct Authenticator {
    api_key: Option<ApiKey>,
}

impl Authenticator {
    /// Creates an authenticator for the given key.
    #[must_use]
    pub const fn new(api_key: Option<ApiKey>) -> Self {
        Self { api_key }
    }

    /// Creates an authenticator from the connector configuration.
    #[must_use]
    pub fn from_config(config: &ConnectorConfig) -> Self {
        Self::new(config.api_key().cloned())
    }

    /// Returns `true` if a key is configured.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the headers to attach to a request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredential`] if no key is configured.
    pub fn headers(&self) -> Result<HeaderSet, AuthError> {
        let key = self.api_key.as_ref().ok_or(AuthError::MissingCredential)?;

        let mut headers = HeaderSet::new();
        headers.insert(AUTH_HEADER.to_string(), key.as_ref().to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        Ok(headers)
    }
}
