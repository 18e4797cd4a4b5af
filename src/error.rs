//! Configuration error types for the Meraki connector.
//!
//! This module contains the error type used for configuration and
//! endpoint-resolution failures.
//!
//! # Error Handling
//!
//! Configuration constructors and endpoint resolution return
//! `Result<T, ConfigError>` so that problems surface before any request is
//! sent. Error messages are written to be shown to an operator as-is.
//!
//! # Example
//!
//! ```rust
//! use meraki_connector::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the connector or resolving an
/// endpoint template.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Meraki Dashboard API key.")]
    EmptyApiKey,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://api.meraki.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The asset configuration could not be deserialized.
    #[error("Invalid asset configuration: {reason}")]
    InvalidAssetConfig {
        /// Why deserialization failed.
        reason: String,
    },

    /// An endpoint template placeholder had no value.
    #[error("Endpoint template '{template}' is missing a value for '{placeholder}'")]
    UnresolvedPlaceholder {
        /// The endpoint template being resolved.
        template: &'static str,
        /// The placeholder name without braces.
        placeholder: String,
    },

    /// An endpoint template contains an unterminated `{`.
    #[error("Endpoint template '{template}' is malformed")]
    MalformedTemplate {
        /// The malformed endpoint template.
        template: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_error_message() {
        let error = ConfigError::EmptyApiKey;
        let message = error.to_string();
        assert!(message.contains("API key cannot be empty"));
        assert!(message.contains("Meraki Dashboard API key"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("scheme and host"));
    }

    #[test]
    fn test_unresolved_placeholder_names_the_placeholder() {
        let error = ConfigError::UnresolvedPlaceholder {
            template: "/devices/{serial}",
            placeholder: "serial".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/devices/{serial}"));
        assert!(message.contains("'serial'"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyApiKey;
        let _: &dyn std::error::Error = &error;
    }
}
