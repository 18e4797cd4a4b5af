//! The Dashboard API endpoints used by the connector.

use crate::clients::HttpMethod;
use crate::rest::Endpoint;

/// List the organizations the API key can access.
pub const LIST_ORGANIZATIONS: Endpoint = Endpoint::new(HttpMethod::Get, "/organizations");

/// License overview of an organization.
pub const ORG_LICENSE_OVERVIEW: Endpoint = Endpoint::new(
    HttpMethod::Get,
    "/organizations/{organization_id}/licenses/overview",
);

/// Devices in an organization's inventory.
pub const ORG_INVENTORY_DEVICES: Endpoint = Endpoint::new(
    HttpMethod::Get,
    "/organizations/{organization_id}/inventory/devices",
);

/// Claim devices into an organization's inventory.
pub const CLAIM_DEVICES: Endpoint = Endpoint::new(
    HttpMethod::Post,
    "/organizations/{organization_id}/inventory/claim",
);

/// Devices in an organization, filterable by `mac`, `serial`, `model` and `tags[]`.
pub const SEARCH_ORG_DEVICES: Endpoint =
    Endpoint::new(HttpMethod::Get, "/organizations/{organization_id}/devices");

/// Devices in a network.
pub const LIST_NETWORK_DEVICES: Endpoint =
    Endpoint::new(HttpMethod::Get, "/networks/{network_id}/devices");

/// Update a device's attributes.
pub const UPDATE_DEVICE: Endpoint = Endpoint::new(HttpMethod::Put, "/devices/{serial}");

/// Remove a device from a network.
pub const REMOVE_NETWORK_DEVICE: Endpoint =
    Endpoint::new(HttpMethod::Post, "/networks/{network_id}/devices/remove");

/// Clients seen by a device.
pub const LIST_DEVICE_CLIENTS: Endpoint =
    Endpoint::new(HttpMethod::Get, "/devices/{serial}/clients");

/// Search an organization's clients by MAC address.
pub const SEARCH_ORG_CLIENTS: Endpoint = Endpoint::new(
    HttpMethod::Get,
    "/organizations/{organization_id}/clients/search",
);

/// Adaptive policy policies.
pub const ADAPTIVE_POLICY_POLICIES: Endpoint = Endpoint::new(
    HttpMethod::Get,
    "/organizations/{organization_id}/adaptivePolicy/policies",
);

/// Adaptive policy ACLs.
pub const ADAPTIVE_POLICY_ACLS: Endpoint = Endpoint::new(
    HttpMethod::Get,
    "/organizations/{organization_id}/adaptivePolicy/acls",
);

/// Adaptive policy groups.
pub const ADAPTIVE_POLICY_GROUPS: Endpoint = Endpoint::new(
    HttpMethod::Get,
    "/organizations/{organization_id}/adaptivePolicy/groups",
);

/// Adaptive policy settings.
pub const ADAPTIVE_POLICY_SETTINGS: Endpoint = Endpoint::new(
    HttpMethod::Get,
    "/organizations/{organization_id}/adaptivePolicy/settings",
);

/// Layer 3 firewall rules of an MX network.
pub const L3_FIREWALL_RULES: Endpoint = Endpoint::new(
    HttpMethod::Get,
    "/networks/{network_id}/appliance/firewall/l3FirewallRules",
);

/// Replace the layer 3 firewall rules of an MX network.
pub const UPDATE_L3_FIREWALL_RULES: Endpoint = Endpoint::new(
    HttpMethod::Put,
    "/networks/{network_id}/appliance/firewall/l3FirewallRules",
);

/// Layer 7 firewall rules of an MX network.
pub const L7_FIREWALL_RULES: Endpoint = Endpoint::new(
    HttpMethod::Get,
    "/networks/{network_id}/appliance/firewall/l7FirewallRules",
);

/// Replace the layer 7 firewall rules of an MX network.
pub const UPDATE_L7_FIREWALL_RULES: Endpoint = Endpoint::new(
    HttpMethod::Put,
    "/networks/{network_id}/appliance/firewall/l7FirewallRules",
);
