//! Connector actions.
//!
//! Each action validates its parameters, performs one or more Dashboard API
//! calls through the [`CallExecutor`], and flattens the response into an
//! [`ActionResult`] with data items and a summary.
//!
//! # Overview
//!
//! - [`ActionKind`]: Every supported action, parsed from its id
//! - [`ActionParams`]: Lenient, validated access to the parameter object
//! - [`ActionResult`]: Status, message, data and summary for the host
//! - [`ActionError`]: Why an action failed
//! - [`firewall`]: Firewall rule validation
//!
//! # Example
//!
//! ```rust
//! use meraki_connector::actions::ActionKind;
//!
//! let kind: ActionKind = "list_device_clients".parse().unwrap();
//! assert_eq!(kind, ActionKind::ListDeviceClients);
//! assert_eq!(kind.as_str(), "list_device_clients");
//!
//! assert!("reboot_device".parse::<ActionKind>().is_err());
//! ```

mod adaptive_policy;
mod clients;
mod connectivity;
mod devices;
pub mod firewall;
mod organizations;
mod params;
mod result;

pub use firewall::FirewallLayer;
pub use params::{ActionParams, ParamError};
pub use result::{ActionOutput, ActionResult, ActionStatus};

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::clients::{CallError, CallExecutor, QueryParams};
use crate::rest::Endpoint;

/// Why an action failed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ActionError {
    /// A parameter failed validation; nothing was sent.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// A Dashboard API call failed.
    #[error(transparent)]
    Call(#[from] CallError),

    /// The connectivity test failed.
    #[error("Test Connectivity Failed. {0}")]
    Connectivity(CallError),

    /// The action id is unknown.
    #[error("Action '{0}' is not implemented")]
    NotImplemented(String),
}

macro_rules! action_kinds {
    ($($variant:ident => $id:literal),+ $(,)?) => {
        /// Every action the connector supports.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum ActionKind {
            $(
                #[doc = concat!("`", $id, "`")]
                $variant,
            )+
        }

        impl ActionKind {
            /// All actions, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the action id.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $id,)+
                }
            }
        }

        impl FromStr for ActionKind {
            type Err = ActionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($id => Ok(Self::$variant),)+
                    other => Err(ActionError::NotImplemented(other.to_string())),
                }
            }
        }
    };
}

action_kinds! {
    TestConnectivity => "test_connectivity",
    ListOrganizations => "list_organizations",
    ListOrgLicenseStates => "list_org_license_states",
    ListOrgInventoryDevices => "list_org_inventory_devices",
    ClaimDevice => "claim_device",
    SearchDevices => "search_devices",
    ListNetworkDevices => "list_network_devices",
    UpdateDevice => "update_device",
    RemoveDevice => "remove_device",
    ListDeviceClients => "list_device_clients",
    SearchOrganizationClients => "search_organization_clients",
    ListAdaptivePolicies => "list_adaptive_policies",
    ListAdaptivePolicyAcls => "list_adaptive_policy_acls",
    ListAdaptivePolicyGroups => "list_adaptive_policy_groups",
    ListAdaptivePolicySettings => "list_adaptive_policy_settings",
    ListL3FirewallRules => "list_l3_firewall_rules",
    ListL7FirewallRules => "list_l7_firewall_rules",
    UpdateL3FirewallRules => "update_l3_firewall_rules",
    UpdateL7FirewallRules => "update_l7_firewall_rules",
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ActionKind {
    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] if validation or any call fails.
    pub async fn run(
        self,
        executor: &CallExecutor,
        params: &ActionParams<'_>,
    ) -> Result<ActionOutput, ActionError> {
        match self {
            Self::TestConnectivity => connectivity::test_connectivity(executor).await,
            Self::ListOrganizations => organizations::list_organizations(executor, params).await,
            Self::ListOrgLicenseStates => {
                organizations::list_license_states(executor, params).await
            }
            Self::ListOrgInventoryDevices => {
                organizations::list_inventory_devices(executor, params).await
            }
            Self::ClaimDevice => organizations::claim_device(executor, params).await,
            Self::SearchDevices => devices::search_devices(executor, params).await,
            Self::ListNetworkDevices => devices::list_network_devices(executor, params).await,
            Self::UpdateDevice => devices::update_device(executor, params).await,
            Self::RemoveDevice => devices::remove_device(executor, params).await,
            Self::ListDeviceClients => clients::list_device_clients(executor, params).await,
            Self::SearchOrganizationClients => {
                clients::search_organization_clients(executor, params).await
            }
            Self::ListAdaptivePolicies => adaptive_policy::list_policies(executor, params).await,
            Self::ListAdaptivePolicyAcls => adaptive_policy::list_acls(executor, params).await,
            Self::ListAdaptivePolicyGroups => adaptive_policy::list_groups(executor, params).await,
            Self::ListAdaptivePolicySettings => {
                adaptive_policy::list_settings(executor, params).await
            }
            Self::ListL3FirewallRules => {
                firewall::list_rules(executor, params, FirewallLayer::L3).await
            }
            Self::ListL7FirewallRules => {
                firewall::list_rules(executor, params, FirewallLayer::L7).await
            }
            Self::UpdateL3FirewallRules => {
                firewall::update_rules(executor, params, FirewallLayer::L3).await
            }
            Self::UpdateL7FirewallRules => {
                firewall::update_rules(executor, params, FirewallLayer::L7).await
            }
        }
    }
}

/// Fetches an endpoint whose payload must be a JSON array.
pub(crate) async fn fetch_list(
    executor: &CallExecutor,
    endpoint: &Endpoint,
    path_params: &[(&str, &str)],
    query: QueryParams,
) -> Result<Vec<Value>, ActionError> {
    let response = executor.execute(endpoint, path_params, None, query).await?;
    match response.body {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(CallError::unexpected_format(response.code).into()),
    }
}

/// Fetches an endpoint whose payload must be a JSON object.
pub(crate) async fn fetch_single(
    executor: &CallExecutor,
    endpoint: &Endpoint,
    path_params: &[(&str, &str)],
    query: QueryParams,
) -> Result<Value, ActionError> {
    let response = executor.execute(endpoint, path_params, None, query).await?;
    match response.body {
        Some(object @ Value::Object(_)) => Ok(object),
        _ => Err(CallError::unexpected_format(response.code).into()),
    }
}

/// Sends a write request and returns the response payload (`null` if empty).
pub(crate) async fn mutate(
    executor: &CallExecutor,
    endpoint: &Endpoint,
    path_params: &[(&str, &str)],
    body: Value,
) -> Result<Value, ActionError> {
    let response = executor
        .call(endpoint, path_params, Some(body), Vec::new())
        .await?;
    Ok(response.unwrap_or(Value::Null))
}

/// Converts a validated, positive limit into a `usize`.
pub(crate) fn limit_to_usize(limit: i64) -> Option<usize> {
    usize::try_from(limit).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_ids_round_trip() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.as_str().parse::<ActionKind>().unwrap(), *kind);
        }
        assert_eq!(ActionKind::ALL.len(), 19);
    }

    #[test]
    fn test_unknown_action_id() {
        let error = "reboot_device".parse::<ActionKind>().unwrap_err();
        assert_eq!(error.to_string(), "Action 'reboot_device' is not implemented");
    }

    #[test]
    fn test_connectivity_error_message() {
        let error = ActionError::Connectivity(CallError::RateLimited { tries: 3 });
        assert!(error
            .to_string()
            .starts_with("Test Connectivity Failed. Max retries exceeded"));
    }
}
