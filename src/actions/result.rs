//! The result handed back to the host platform for every action.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::actions::{ActionError, ActionKind};

/// Whether an action succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    /// The action completed.
    Success,
    /// The action failed; see the message.
    Failure,
}

/// Data and summary produced by a successful action.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionOutput {
    /// Data items, one per entity.
    pub data: Vec<Value>,
    /// Summary key/value pairs.
    pub summary: Map<String, Value>,
    /// Replaces the default success message when set.
    pub message: Option<String>,
}

impl ActionOutput {
    /// Creates output from data items and a summary object.
    ///
    /// A `summary` that is not a JSON object yields an empty summary.
    #[must_use]
    pub fn new(data: Vec<Value>, summary: Value) -> Self {
        let summary = match summary {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            data,
            summary,
            message: None,
        }
    }

    /// Sets the success message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// The outcome of one action invocation.
///
/// # Example
///
/// ```rust
/// use meraki_connector::actions::{ActionResult, ActionStatus};
///
/// let result = ActionResult::not_implemented("reboot_device");
/// assert_eq!(result.status, ActionStatus::Failure);
/// assert_eq!(result.message, "Action 'reboot_device' is not implemented");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Success or failure.
    pub status: ActionStatus,
    /// Human-readable status message.
    pub message: String,
    /// Data items.
    pub data: Vec<Value>,
    /// Summary key/value pairs.
    pub summary: Map<String, Value>,
}

impl ActionResult {
    /// Builds a success result for `kind`.
    #[must_use]
    pub fn success(kind: ActionKind, output: ActionOutput) -> Self {
        let message = output.message.unwrap_or_else(|| {
            format!("Successfully executed action: {}", kind.as_str().replace('_', " "))
        });
        Self {
            status: ActionStatus::Success,
            message,
            data: output.data,
            summary: output.summary,
        }
    }

    /// Builds a failure result from an error.
    #[must_use]
    pub fn failure(error: &ActionError) -> Self {
        Self {
            status: ActionStatus::Failure,
            message: error.to_string(),
            data: Vec::new(),
            summary: Map::new(),
        }
    }

    /// Builds the failure result for an unknown action id.
    #[must_use]
    pub fn not_implemented(action_id: &str) -> Self {
        Self::failure(&ActionError::NotImplemented(action_id.to_string()))
    }

    /// Returns `true` if the action succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Success
    }
}
