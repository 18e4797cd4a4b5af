//! End-to-end tests for connector actions against a mock Dashboard API.

mod common;

use common::{config, config_without_key, json_response, ScriptedTransport};
use meraki_connector::{ActionKind, ActionStatus, Connector};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn json_body(body: &Value) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "application/json")
        .set_body_string(body.to_string())
}

fn connector(server: &MockServer) -> Connector {
    Connector::new(config(&server.uri())).unwrap()
}

fn l3_rule() -> Value {
    json!({
        "comment": "Block telnet",
        "policy": "deny",
        "protocol": "tcp",
        "srcPort": "Any",
        "srcCidr": "Any",
        "destPort": "23",
        "destCidr": "10.0.0.0/8"
    })
}

// ============================================================================
// Connectivity
// ============================================================================

#[tokio::test]
async fn test_connectivity_passes_on_organization_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/organizations"))
        .respond_with(json_body(&json!([{"id": "1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let result = connector(&server)
        .handle_action("test_connectivity", &json!({}))
        .await;

    assert_eq!(result.status, ActionStatus::Success);
    assert_eq!(result.message, "Test Connectivity Passed");
}

#[tokio::test]
async fn test_connectivity_fails_on_rejected_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let result = connector(&server)
        .handle_action("test_connectivity", &json!({}))
        .await;

    assert_eq!(result.status, ActionStatus::Failure);
    assert_eq!(
        result.message,
        "Test Connectivity Failed. API key invalid or expired"
    );
}

#[tokio::test]
async fn test_connectivity_without_key_sends_nothing() {
    let transport = ScriptedTransport::new(vec![]);
    let connector = Connector::with_transport(&config_without_key("https://h"), transport.clone());

    let result = connector.run(ActionKind::TestConnectivity, &json!({})).await;

    assert!(!result.is_success());
    assert_eq!(
        result.message,
        "Test Connectivity Failed. API key not found in asset configuration"
    );
    assert_eq!(transport.calls(), 0);
}

// ============================================================================
// Dispatch and parameters
// ============================================================================

#[tokio::test]
async fn test_unknown_action_is_not_implemented() {
    let transport = ScriptedTransport::new(vec![]);
    let connector = Connector::with_transport(&config("https://h"), transport.clone());

    let result = connector.handle_action("reboot_device", &json!({})).await;

    assert_eq!(result.status, ActionStatus::Failure);
    assert_eq!(result.message, "Action 'reboot_device' is not implemented");
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_missing_parameter_fails_before_any_request() {
    let transport = ScriptedTransport::new(vec![]);
    let connector = Connector::with_transport(&config("https://h"), transport.clone());

    let result = connector
        .handle_action("list_network_devices", &json!({"network_id": "   "}))
        .await;
    assert_eq!(
        result.message,
        "Please provide a valid value for 'network_id'"
    );

    let result = connector
        .handle_action("update_device", &json!({"serial": "Q2XX-1"}))
        .await;
    assert!(result.message.starts_with("At least one of the parameters"));

    let result = connector
        .handle_action(
            "list_device_clients",
            &json!({"serial": "Q2XX", "timespan": 60}),
        )
        .await;
    assert_eq!(
        result.message,
        "Parameter 'timespan' must be between 300 and 2592000"
    );

    assert_eq!(transport.calls(), 0);
}

// ============================================================================
// Organizations and devices
// ============================================================================

#[tokio::test]
async fn test_list_organizations_reports_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/organizations"))
        .and(query_param("perPage", "2"))
        .respond_with(json_body(&json!([{"id": "1"}, {"id": "2"}])))
        .expect(1)
        .mount(&server)
        .await;

    let result = connector(&server)
        .handle_action("list_organizations", &json!({"limit": 2}))
        .await;

    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.data.len(), 2);
    assert_eq!(result.summary["total_organizations"], 2);
    assert_eq!(
        result.message,
        "Successfully executed action: list organizations"
    );
}

#[tokio::test]
async fn test_claim_device_sends_serial_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/organizations/123/inventory/claim"))
        .and(body_json(json!({"serials": ["Q2XX-1", "Q2XX-2"]})))
        .respond_with(json_body(&json!({"serials": ["Q2XX-1", "Q2XX-2"]})))
        .expect(1)
        .mount(&server)
        .await;

    let result = connector(&server)
        .handle_action(
            "claim_device",
            &json!({"organization_id": "123", "serials": "Q2XX-1, Q2XX-2"}),
        )
        .await;

    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.summary["total_devices_claimed"], 2);
}

#[tokio::test]
async fn test_search_devices_sends_repeated_tags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/organizations/123/devices"))
        .and(query_param("model", "MR46"))
        .and(query_param("tags[]", "lobby"))
        .and(query_param("tags[]", "floor2"))
        .respond_with(json_body(&json!([{"serial": "Q2XX-1", "model": "MR46"}])))
        .expect(1)
        .mount(&server)
        .await;

    let result = connector(&server)
        .handle_action(
            "search_devices",
            &json!({"organization_id": "123", "model": "MR46", "tags": "lobby,floor2"}),
        )
        .await;

    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.summary["total_devices_found"], 1);
    assert_eq!(
        result.summary["search_criteria"],
        "organization_id: 123, model: MR46, tags: lobby, floor2"
    );
}

#[tokio::test]
async fn test_search_devices_by_organization_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/organizations/549236/devices"))
        .and(query_param("perPage", "1000"))
        .respond_with(json_body(&json!([{"serial": "Q2XX-1"}, {"serial": "Q2XX-2"}])))
        .expect(1)
        .mount(&server)
        .await;

    let result = connector(&server)
        .handle_action("search_devices", &json!({"organization_id": "549236"}))
        .await;

    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.data.len(), 2);
    assert_eq!(result.summary["total_devices_found"], 2);
    assert_eq!(result.summary["search_criteria"], "organization_id: 549236");
}

#[tokio::test]
async fn test_update_device_sends_only_given_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/devices/Q2XX-1"))
        .and(body_json(json!({"name": "Lobby AP", "tags": ["a", "b"]})))
        .respond_with(json_body(&json!({"serial": "Q2XX-1", "name": "Lobby AP"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = connector(&server)
        .handle_action(
            "update_device",
            &json!({"serial": "Q2XX-1", "name": "Lobby AP", "tags": "a, b"}),
        )
        .await;

    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.data[0]["name"], "Lobby AP");
    assert_eq!(result.summary["device_updated"], true);
}

#[tokio::test]
async fn test_remove_device_accepts_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/networks/N_1/devices/remove"))
        .and(body_json(json!({"serial": "Q2XX-1"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = connector(&server)
        .handle_action(
            "remove_device",
            &json!({"network_id": "N_1", "serial": "Q2XX-1"}),
        )
        .await;

    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.summary["device_removed"], true);
}

#[tokio::test]
async fn test_api_error_surfaces_in_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("Content-Type", "application/json")
                .set_body_string(r#"{"errors":["Network not found"]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = connector(&server)
        .handle_action("list_network_devices", &json!({"network_id": "N_404"}))
        .await;

    assert_eq!(result.status, ActionStatus::Failure);
    assert_eq!(
        result.message,
        "Status Code: 404. Error: Network not found"
    );
    assert!(result.data.is_empty());
}

// ============================================================================
// Clients and adaptive policy
// ============================================================================

#[tokio::test]
async fn test_search_organization_clients_summarises_records() {
    let transport = ScriptedTransport::new(vec![json_response(
        200,
        r#"{"clientId":"k74272e","mac":"22:33:44:55:66:77","records":[{"network":{"id":"N_1"}}]}"#,
    )]);
    let connector = Connector::with_transport(&config("https://h"), transport.clone());

    let result = connector
        .handle_action(
            "search_organization_clients",
            &json!({"organization_id": "123", "mac": "22:33:44:55:66:77", "per_page": 4}),
        )
        .await;

    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.summary["client_id"], "k74272e");
    assert_eq!(result.summary["total_records"], 1);

    let request = &transport.requests()[0];
    assert_eq!(request.url, "https://h/api/v1/organizations/123/clients/search");
    assert_eq!(request.query_value("mac"), Some("22:33:44:55:66:77"));
    assert_eq!(request.query_value("perPage"), Some("4"));
}

#[tokio::test]
async fn test_adaptive_policy_settings_counts_enabled_networks() {
    let transport = ScriptedTransport::new(vec![json_response(
        200,
        r#"{"enabledNetworks":["N_1","N_2"]}"#,
    )]);
    let connector = Connector::with_transport(&config("https://h"), transport);

    let result = connector
        .handle_action(
            "list_adaptive_policy_settings",
            &json!({"organization_id": "123"}),
        )
        .await;

    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.summary["enabled_networks"], 2);
}

// ============================================================================
// Firewall rules
// ============================================================================

#[tokio::test]
async fn test_list_l3_rules_returns_one_item_per_rule() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/networks/N_1/appliance/firewall/l3FirewallRules"))
        .respond_with(json_body(&json!({"rules": [l3_rule(), l3_rule()]})))
        .expect(1)
        .mount(&server)
        .await;

    let result = connector(&server)
        .handle_action("list_l3_firewall_rules", &json!({"network_id": "N_1"}))
        .await;

    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.data.len(), 2);
    assert_eq!(result.summary["total_rules"], 2);
}

#[tokio::test]
async fn test_update_l3_rules_sends_validated_rules() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/networks/N_1/appliance/firewall/l3FirewallRules"))
        .and(body_json(json!({"rules": [l3_rule()]})))
        .respond_with(json_body(&json!({"rules": [l3_rule()]})))
        .expect(1)
        .mount(&server)
        .await;

    let rules = Value::Array(vec![l3_rule()]).to_string();
    let result = connector(&server)
        .handle_action(
            "update_l3_firewall_rules",
            &json!({"network_id": "N_1", "rules": rules}),
        )
        .await;

    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.summary["total_rules_updated"], 1);
}

#[tokio::test]
async fn test_invalid_firewall_rules_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let connector = connector(&server);

    let mut bad_cidr = l3_rule();
    bad_cidr["destCidr"] = json!("10.0.0.1/8");
    let result = connector
        .handle_action(
            "update_l3_firewall_rules",
            &json!({"network_id": "N_1", "rules": [bad_cidr]}),
        )
        .await;
    assert_eq!(result.message, "Invalid rule: Invalid destination CIDR");

    let result = connector
        .handle_action(
            "update_l3_firewall_rules",
            &json!({"network_id": "N_1", "rules": "[{not json"}),
        )
        .await;
    assert_eq!(result.message, "Invalid JSON in rules parameter");

    let result = connector
        .handle_action(
            "update_l7_firewall_rules",
            &json!({"network_id": "N_1", "rules": [{"policy": "deny", "type": "port", "value": "99999"}]}),
        )
        .await;
    assert_eq!(result.message, "Invalid rule: Invalid port value");

    let result = connector
        .handle_action(
            "update_l7_firewall_rules",
            &json!({"network_id": "N_1", "rules": "{\"policy\":\"deny\"}"}),
        )
        .await;
    assert_eq!(result.message, "Rules must be a list of rule objects");
}
