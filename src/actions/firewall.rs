//! MX appliance firewall rules: validation and the list/update actions.
//!
//! Rules are validated locally before an update is sent, so a malformed
//! rule set never reaches the Dashboard API.

use std::net::IpAddr;

use serde_json::{json, Value};

use crate::actions::{fetch_single, mutate, ActionError, ActionOutput, ActionParams, ParamError};
use crate::clients::CallExecutor;
use crate::rest::{endpoints, Endpoint};

/// Fields every layer 3 rule must carry.
pub const L3_REQUIRED_FIELDS: &[&str] = &[
    "comment", "policy", "protocol", "srcPort", "srcCidr", "destPort", "destCidr",
];

/// Fields every layer 7 rule must carry.
pub const L7_REQUIRED_FIELDS: &[&str] = &["policy", "type", "value"];

const L3_POLICIES: &[&str] = &["allow", "deny"];
const L3_PROTOCOLS: &[&str] = &["tcp", "udp", "icmp", "icmp6", "any"];
const L7_POLICIES: &[&str] = &["deny"];
const L7_TYPES: &[&str] = &["application", "applicationCategory", "host", "port", "ipRange"];

/// The firewall layer a rule set belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirewallLayer {
    /// Layer 3 (address/port) rules.
    L3,
    /// Layer 7 (application) rules.
    L7,
}

impl FirewallLayer {
    /// Validates one rule for this layer.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidRule`] describing the first problem found.
    pub fn validate(self, rule: &Value) -> Result<(), ParamError> {
        match self {
            Self::L3 => validate_l3_rule(rule),
            Self::L7 => validate_l7_rule(rule),
        }
    }
}

fn invalid(reason: impl Into<String>) -> ParamError {
    ParamError::InvalidRule {
        reason: reason.into(),
    }
}

fn check_required(rule: &Value, fields: &[&str]) -> Result<(), ParamError> {
    if !rule.is_object() {
        return Err(invalid("Rule must be an object"));
    }
    match fields.iter().find(|field| rule.get(**field).is_none()) {
        Some(field) => Err(invalid(format!("Missing required field: {field}"))),
        None => Ok(()),
    }
}

fn check_one_of(rule: &Value, field: &str, allowed: &[&str], label: &str) -> Result<(), ParamError> {
    let value = rule.get(field).and_then(Value::as_str).unwrap_or_default();
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!(
            "Invalid {label}. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

/// Validates a layer 3 firewall rule.
///
/// # Errors
///
/// Returns [`ParamError::InvalidRule`] if a field is missing or invalid.
///
/// # Example
///
/// ```rust
/// use meraki_connector::actions::firewall::validate_l3_rule;
/// use serde_json::json;
///
/// let rule = json!({
///     "comment": "Block telnet",
///     "policy": "deny",
///     "protocol": "tcp",
///     "srcPort": "Any",
///     "srcCidr": "Any",
///     "destPort": "23",
///     "destCidr": "10.0.0.0/8"
/// });
/// assert!(validate_l3_rule(&rule).is_ok());
/// ```
pub fn validate_l3_rule(rule: &Value) -> Result<(), ParamError> {
    check_required(rule, L3_REQUIRED_FIELDS)?;
    check_one_of(rule, "policy", L3_POLICIES, "policy")?;
    check_one_of(rule, "protocol", L3_PROTOCOLS, "protocol")?;

    if !valid_port(&rule["srcPort"]) {
        return Err(invalid("Invalid source port"));
    }
    if !valid_port(&rule["destPort"]) {
        return Err(invalid("Invalid destination port"));
    }
    if !valid_cidr_list(&rule["srcCidr"]) {
        return Err(invalid("Invalid source CIDR"));
    }
    if !valid_cidr_list(&rule["destCidr"]) {
        return Err(invalid("Invalid destination CIDR"));
    }
    Ok(())
}

/// Validates a layer 7 firewall rule.
///
/// # Errors
///
/// Returns [`ParamError::InvalidRule`] if a field is missing or invalid.
pub fn validate_l7_rule(rule: &Value) -> Result<(), ParamError> {
    check_required(rule, L7_REQUIRED_FIELDS)?;
    check_one_of(rule, "policy", L7_POLICIES, "policy")?;
    check_one_of(rule, "type", L7_TYPES, "type")?;

    let value = &rule["value"];
    match rule["type"].as_str().unwrap_or_default() {
        "port" if !valid_single_port(value) => Err(invalid("Invalid port value")),
        "host" | "application" if is_blank(value) => {
            Err(invalid("Value cannot be empty for host or application type"))
        }
        _ => Ok(()),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn port_number(text: &str) -> Option<u16> {
    text.trim().parse::<u16>().ok().filter(|port| *port >= 1)
}

fn valid_single_port(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_u64().is_some_and(|port| (1..=65535).contains(&port)),
        Value::String(s) => port_number(s).is_some(),
        _ => false,
    }
}

/// A port is `1..=65535`, a range `a-b` with `a <= b`, or `any`.
fn valid_port(value: &Value) -> bool {
    let Value::String(text) = value else {
        return valid_single_port(value);
    };
    let text = text.trim();
    if text.eq_ignore_ascii_case("any") {
        return true;
    }
    match text.split_once('-') {
        Some((start, end)) => match (port_number(start), port_number(end)) {
            (Some(start), Some(end)) => start <= end,
            _ => false,
        },
        None => port_number(text).is_some(),
    }
}

/// A comma-separated list of networks, or `any`.
fn valid_cidr_list(value: &Value) -> bool {
    let Some(text) = value.as_str() else {
        return false;
    };
    if text.trim().eq_ignore_ascii_case("any") {
        return true;
    }
    let mut networks = text.split(',').map(str::trim).peekable();
    networks.peek().is_some() && networks.all(valid_cidr)
}

/// An IPv4/IPv6 address or network in `addr/prefix` form with no host bits
/// set.
fn valid_cidr(text: &str) -> bool {
    let (address, prefix) = match text.split_once('/') {
        Some((address, prefix)) => (address, Some(prefix)),
        None => (text, None),
    };
    let Ok(address) = address.parse::<IpAddr>() else {
        return false;
    };
    let Some(prefix) = prefix else {
        return true;
    };
    let Ok(prefix) = prefix.parse::<u32>() else {
        return false;
    };

    match address {
        IpAddr::V4(v4) => {
            prefix <= 32 && u32::from(v4).checked_shl(prefix).unwrap_or(0) == 0
        }
        IpAddr::V6(v6) => {
            prefix <= 128 && u128::from(v6).checked_shl(prefix).unwrap_or(0) == 0
        }
    }
}

/// Returns the (list, update) endpoints for a layer.
const fn rules_endpoints(layer: FirewallLayer) -> (Endpoint, Endpoint) {
    match layer {
        FirewallLayer::L3 => (
            endpoints::L3_FIREWALL_RULES,
            endpoints::UPDATE_L3_FIREWALL_RULES,
        ),
        FirewallLayer::L7 => (
            endpoints::L7_FIREWALL_RULES,
            endpoints::UPDATE_L7_FIREWALL_RULES,
        ),
    }
}

/// Lists a network's firewall rules; one data item per rule.
pub(crate) async fn list_rules(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
    layer: FirewallLayer,
) -> Result<ActionOutput, ActionError> {
    let network_id = params.required_str("network_id")?;
    let (list, _) = rules_endpoints(layer);

    let response = fetch_single(
        executor,
        &list,
        &[("network_id", network_id.as_str())],
        Vec::new(),
    )
    .await?;
    let rules = match response.get("rules") {
        Some(Value::Array(rules)) => rules.clone(),
        _ => Vec::new(),
    };

    let summary = json!({ "total_rules": rules.len() });
    Ok(ActionOutput::new(rules, summary))
}

/// Validates and replaces a network's firewall rules.
pub(crate) async fn update_rules(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
    layer: FirewallLayer,
) -> Result<ActionOutput, ActionError> {
    let network_id = params.required_str("network_id")?;
    let rules = params.rule_list("rules")?;
    for rule in &rules {
        layer.validate(rule)?;
    }
    let (_, update) = rules_endpoints(layer);

    let total = rules.len();
    let response = mutate(
        executor,
        &update,
        &[("network_id", network_id.as_str())],
        json!({ "rules": rules }),
    )
    .await?;

    Ok(ActionOutput::new(
        vec![json!({ "rules_updated": true, "rules": response })],
        json!({ "total_rules_updated": total }),
    ))
}
