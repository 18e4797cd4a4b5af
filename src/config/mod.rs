//! Configuration types for the Meraki connector.
//!
//! This module provides the configuration consumed by the REST invocation
//! layer: the API credential, the Dashboard base URL and the TLS verification
//! flag.
//!
//! # Overview
//!
//! - [`ConnectorConfig`]: Read-only configuration shared by every call
//! - [`ConnectorConfigBuilder`]: A builder for constructing [`ConnectorConfig`]
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`BaseUrl`]: A validated Dashboard base URL
//!
//! # Example
//!
//! ```rust
//! use meraki_connector::{ApiKey, BaseUrl, ConnectorConfig};
//!
//! let config = ConnectorConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .base_url(BaseUrl::new("https://api.meraki.com").unwrap())
//!     .verify_server_cert(true)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.api_key().is_some());
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl};

use serde::Deserialize;

use crate::error::ConfigError;

/// Configuration for the Meraki connector.
///
/// The API key is optional at this level: a connector without a key can
/// still be constructed, and the authenticator reports the missing credential
/// when a request is attempted.
///
/// # Thread Safety
///
/// `ConnectorConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ConnectorConfig {
    api_key: Option<ApiKey>,
    base_url: BaseUrl,
    verify_server_cert: bool,
    user_agent_prefix: Option<String>,
}

/// Raw asset configuration as handed over by the host platform.
#[derive(Debug, Default, Deserialize)]
struct AssetConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    verify_server_cert: Option<bool>,
}

impl ConnectorConfig {
    /// Creates a new builder for constructing a `ConnectorConfig`.
    #[must_use]
    pub fn builder() -> ConnectorConfigBuilder {
        ConnectorConfigBuilder::new()
    }

    /// Builds a configuration from the host platform's asset JSON.
    ///
    /// Recognised keys are `api_key`, `base_url` and `verify_server_cert`.
    /// An absent or blank `api_key` yields a configuration without a
    /// credential.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAssetConfig`] if the value is not an
    /// object with the expected field types, or
    /// [`ConfigError::InvalidBaseUrl`] if `base_url` is malformed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use meraki_connector::ConnectorConfig;
    /// use serde_json::json;
    ///
    /// let config = ConnectorConfig::from_asset_json(&json!({
    ///     "api_key": "abc123",
    ///     "verify_server_cert": false
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.base_url().as_ref(), "https://api.meraki.com");
    /// assert!(!config.verify_server_cert());
    /// ```
    pub fn from_asset_json(asset: &serde_json::Value) -> Result<Self, ConfigError> {
        let asset = AssetConfig::deserialize(asset).map_err(|e| {
            ConfigError::InvalidAssetConfig {
                reason: e.to_string(),
            }
        })?;

        let mut builder = Self::builder();
        if let Some(key) = asset.api_key.filter(|k| !k.trim().is_empty()) {
            builder = builder.api_key(ApiKey::new(key)?);
        }
        if let Some(url) = asset.base_url.filter(|u| !u.trim().is_empty()) {
            builder = builder.base_url(BaseUrl::new(url)?);
        }
        if let Some(verify) = asset.verify_server_cert {
            builder = builder.verify_server_cert(verify);
        }
        builder.build()
    }

    /// Returns the API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the Dashboard base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns whether server TLS certificates are verified.
    #[must_use]
    pub const fn verify_server_cert(&self) -> bool {
        self.verify_server_cert
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ConnectorConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConnectorConfig>();
};

/// Builder for constructing [`ConnectorConfig`] instances.
///
/// # Defaults
///
/// - `api_key`: `None`
/// - `base_url`: `https://api.meraki.com`
/// - `verify_server_cert`: `true`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ConnectorConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    verify_server_cert: Option<bool>,
    user_agent_prefix: Option<String>,
}

impl ConnectorConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the Dashboard base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets whether server TLS certificates are verified.
    #[must_use]
    pub const fn verify_server_cert(mut self, verify: bool) -> Self {
        self.verify_server_cert = Some(verify);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ConnectorConfig`].
    ///
    /// # Errors
    ///
    /// This currently never fails; the `Result` keeps the signature stable
    /// for required fields added later.
    #[allow(clippy::unnecessary_wraps)]
    pub fn build(self) -> Result<ConnectorConfig, ConfigError> {
        Ok(ConnectorConfig {
            api_key: self.api_key,
            base_url: self.base_url.unwrap_or_default(),
            verify_server_cert: self.verify_server_cert.unwrap_or(true),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
