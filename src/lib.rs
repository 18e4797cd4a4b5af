//! # Meraki Connector
//!
//! A Rust connector core for the Cisco Meraki Dashboard API: configuration,
//! API-key authentication, HTTP transport, response classification, HTTP 429
//! retry handling and `Link`-header pagination, plus the connector actions
//! built on top of them.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ConnectorConfig`] and [`ConnectorConfigBuilder`]
//! - Validated newtypes for the API key and base URL
//! - API-key authentication via [`auth::Authenticator`]
//! - A pluggable HTTP [`clients::Transport`] with a `reqwest` implementation
//! - A [`clients::CallExecutor`] that retries rate-limited calls and
//!   classifies every response into an [`clients::Outcome`]
//! - Pagination of list endpoints via [`clients::CallExecutor::paginate`]
//! - The endpoint catalogue in [`rest::endpoints`]
//! - Parameter-validated actions dispatched by [`Connector::handle_action`]
//!
//! ## Quick Start
//!
//! ```rust
//! use meraki_connector::{ApiKey, ConnectorConfig};
//!
//! let config = ConnectorConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api.meraki.com");
//! ```
//!
//! ## Making Calls
//!
//! ```rust,ignore
//! use meraki_connector::clients::CallExecutor;
//! use meraki_connector::rest::endpoints;
//!
//! let executor = CallExecutor::new(&config)?;
//!
//! // One logical call: retried on 429, classified on anything else
//! let devices = executor
//!     .call(&endpoints::LIST_NETWORK_DEVICES, &[("network_id", "N_1")], None, Vec::new())
//!     .await?;
//!
//! // A paginated list, at most 50 items
//! let organizations = executor
//!     .paginate(&endpoints::LIST_ORGANIZATIONS, &[], Some(50), Vec::new())
//!     .await?;
//! ```
//!
//! ## Running Actions
//!
//! ```rust,ignore
//! use meraki_connector::{Connector, ConnectorConfig};
//! use serde_json::json;
//!
//! let config = ConnectorConfig::from_asset_json(&json!({"api_key": "..."}))?;
//! let connector = Connector::new(config)?;
//!
//! let result = connector.handle_action("test_connectivity", &json!({})).await;
//! println!("{}", result.message);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and executor are passed explicitly
//! - **Fail-fast validation**: Newtypes, endpoint templates and action
//!   parameters are validated before any request is sent
//! - **Errors as values**: Every anticipated failure is a [`clients::CallError`]
//! - **Sequential**: Retries and page fetches never overlap
//! - **Credential hygiene**: The API key is never logged or printed

pub mod actions;
pub mod auth;
pub mod clients;
pub mod config;
mod connector;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, BaseUrl, ConnectorConfig, ConnectorConfigBuilder};
pub use connector::Connector;
pub use error::ConfigError;

pub use actions::{ActionKind, ActionResult, ActionStatus};
pub use auth::AuthError;
pub use clients::{CallError, CallExecutor, Outcome};
