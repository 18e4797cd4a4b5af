//! The action entry point.
//!
//! [`Connector`] owns the [`CallExecutor`] built from the configuration and
//! dispatches action ids to their handlers.
//!
//! # Example
//!
//! ```rust,ignore
//! use meraki_connector::{Connector, ConnectorConfig};
//! use serde_json::json;
//!
//! let config = ConnectorConfig::from_asset_json(&json!({"api_key": "..."}))?;
//! let connector = Connector::new(config)?;
//!
//! let result = connector
//!     .handle_action("list_network_devices", &json!({"network_id": "N_1234"}))
//!     .await;
//! println!("{}: {}", result.message, result.data.len());
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::actions::{ActionKind, ActionParams, ActionResult};
use crate::clients::{CallError, CallExecutor, Transport};
use crate::config::ConnectorConfig;

/// Dispatches actions against the Dashboard API.
#[derive(Debug, Clone)]
pub struct Connector {
    executor: CallExecutor,
}

// Verify Connector is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Connector>();
};

impl Connector {
    /// Creates a connector using the production HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ConnectorConfig) -> Result<Self, CallError> {
        Ok(Self {
            executor: CallExecutor::new(&config)?,
        })
    }

    /// Creates a connector that sends requests through `transport`.
    #[must_use]
    pub fn with_transport(config: &ConnectorConfig, transport: Arc<dyn Transport>) -> Self {
        Self::with_executor(CallExecutor::with_transport(config, transport))
    }

    /// Creates a connector around an existing executor.
    #[must_use]
    pub const fn with_executor(executor: CallExecutor) -> Self {
        Self { executor }
    }

    /// Returns the executor.
    #[must_use]
    pub const fn executor(&self) -> &CallExecutor {
        &self.executor
    }

    /// Runs the action named `action_id` with the host's parameter object.
    ///
    /// Never fails: every error is reported in the returned result.
    pub async fn handle_action(&self, action_id: &str, params: &Value) -> ActionResult {
        let kind = match action_id.parse::<ActionKind>() {
            Ok(kind) => kind,
            Err(error) => {
                tracing::error!("{}", error);
                return ActionResult::failure(&error);
            }
        };
        self.run(kind, params).await
    }

    /// Runs `kind` with the host's parameter object.
    pub async fn run(&self, kind: ActionKind, params: &Value) -> ActionResult {
        tracing::info!(action = %kind, "Executing action");

        match kind.run(&self.executor, &ActionParams::new(params)).await {
            Ok(output) => {
                let result = ActionResult::success(kind, output);
                tracing::info!(action = %kind, items = result.data.len(), "{}", result.message);
                result
            }
            Err(error) => {
                tracing::error!(action = %kind, "{}", error);
                ActionResult::failure(&error)
            }
        }
    }
}
