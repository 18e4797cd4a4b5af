//! Adaptive policy actions: policies, ACLs, groups and settings.

use serde_json::{json, Value};

use crate::actions::{fetch_list, fetch_single, ActionError, ActionOutput, ActionParams};
use crate::clients::CallExecutor;
use crate::rest::{endpoints, Endpoint};

async fn list_items(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
    endpoint: &Endpoint,
) -> Result<(String, Vec<Value>), ActionError> {
    let organization_id = params.required_str("organization_id")?;
    let items = fetch_list(
        executor,
        endpoint,
        &[("organization_id", organization_id.as_str())],
        Vec::new(),
    )
    .await?;
    Ok((organization_id, items))
}

pub(crate) async fn list_policies(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let (organization_id, policies) =
        list_items(executor, params, &endpoints::ADAPTIVE_POLICY_POLICIES).await?;

    let summary = json!({
        "total_items": policies.len(),
        "operation_type": "policies",
        "organization_id": organization_id,
    });
    Ok(ActionOutput::new(policies, summary))
}

pub(crate) async fn list_acls(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let (_, acls) = list_items(executor, params, &endpoints::ADAPTIVE_POLICY_ACLS).await?;

    let summary = json!({ "total_acls": acls.len() });
    Ok(ActionOutput::new(acls, summary))
}

pub(crate) async fn list_groups(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let (_, groups) = list_items(executor, params, &endpoints::ADAPTIVE_POLICY_GROUPS).await?;

    let summary = json!({ "total_groups": groups.len() });
    Ok(ActionOutput::new(groups, summary))
}

pub(crate) async fn list_settings(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let organization_id = params.required_str("organization_id")?;
    let settings = fetch_single(
        executor,
        &endpoints::ADAPTIVE_POLICY_SETTINGS,
        &[("organization_id", organization_id.as_str())],
        Vec::new(),
    )
    .await?;

    let enabled_networks = settings
        .get("enabledNetworks")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    Ok(ActionOutput::new(
        vec![settings],
        json!({ "enabled_networks": enabled_networks }),
    ))
}
