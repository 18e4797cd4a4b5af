//! Endpoint descriptors.
//!
//! An [`Endpoint`] pairs an HTTP method with a path template relative to the
//! API root (`/api/v1`). Templates use `{name}` placeholders that are filled
//! from caller-supplied path parameters:
//!
//! - `/organizations` - No placeholders
//! - `/organizations/{organization_id}/devices` - One placeholder
//!
//! # Example
//!
//! ```rust
//! use meraki_connector::clients::HttpMethod;
//! use meraki_connector::rest::Endpoint;
//!
//! const NETWORK_DEVICES: Endpoint = Endpoint::new(HttpMethod::Get, "/networks/{network_id}/devices");
//!
//! let path = NETWORK_DEVICES.resolve(&[("network_id", "N_123")]).unwrap();
//! assert_eq!(path, "/networks/N_123/devices");
//! ```

use std::fmt;

use crate::clients::HttpMethod;
use crate::error::ConfigError;

/// A Dashboard API operation: method plus path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// The HTTP method for this endpoint.
    pub method: HttpMethod,
    /// The path template with `{name}` placeholders.
    pub template: &'static str,
}

impl Endpoint {
    /// Creates a new `Endpoint`.
    ///
    /// This is a `const fn` so endpoints can be declared as constants.
    #[must_use]
    pub const fn new(method: HttpMethod, template: &'static str) -> Self {
        Self { method, template }
    }

    /// Returns the placeholder names in template order.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.template;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else { break };
            names.push(&after[..end]);
            rest = &after[end + 1..];
        }
        names
    }

    /// Substitutes path parameters into the template.
    ///
    /// Values are percent-encoded, so a value can never add path segments.
    /// Parameters without a matching placeholder are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnresolvedPlaceholder`] if a placeholder has no
    /// value (or an empty one), and [`ConfigError::MalformedTemplate`] if the
    /// template has an unterminated or empty placeholder.
    pub fn resolve(&self, params: &[(&str, &str)]) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(start) = rest.find('{') {
            result.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or(ConfigError::MalformedTemplate {
                template: self.template,
            })?;
            let name = &after[..end];
            if name.is_empty() {
                return Err(ConfigError::MalformedTemplate {
                    template: self.template,
                });
            }

            let value = params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.trim())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::UnresolvedPlaceholder {
                    template: self.template,
                    placeholder: name.to_string(),
                })?;

            result.push_str(&urlencoding::encode(value));
            rest = &after[end + 1..];
        }

        result.push_str(rest);
        Ok(result)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method.to_string().to_uppercase(), self.template)
    }
}

// Verify Endpoint is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Endpoint>();
};
