//! Organization-level actions: organizations, licenses and inventory.

use serde_json::{json, Value};

use crate::actions::{
    fetch_single, limit_to_usize, mutate, ActionError, ActionOutput, ActionParams,
};
use crate::clients::constants::MAX_PAGE_SIZE;
use crate::clients::CallExecutor;
use crate::rest::endpoints;

const MAX_LIMIT: i64 = 100_000;

fn limit(params: &ActionParams<'_>) -> Result<usize, ActionError> {
    let limit = params
        .optional_int_in_range("limit", 1, MAX_LIMIT)?
        .and_then(limit_to_usize)
        .unwrap_or(MAX_PAGE_SIZE);
    Ok(limit)
}

pub(crate) async fn list_organizations(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let limit = limit(params)?;
    let organizations = executor
        .paginate(&endpoints::LIST_ORGANIZATIONS, &[], Some(limit), Vec::new())
        .await?;

    let summary = json!({ "total_organizations": organizations.len() });
    Ok(ActionOutput::new(organizations, summary))
}

pub(crate) async fn list_license_states(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let organization_id = params.required_str("organization_id")?;
    let overview = fetch_single(
        executor,
        &endpoints::ORG_LICENSE_OVERVIEW,
        &[("organization_id", organization_id.as_str())],
        Vec::new(),
    )
    .await?;

    let summary = json!({
        "license_status": overview.get("status").cloned().unwrap_or_else(|| json!("unknown")),
        "expiration_date": overview.get("expirationDate").cloned().unwrap_or(Value::Null),
        "total_licenses": overview
            .get("licenses")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
    });
    Ok(ActionOutput::new(vec![overview], summary))
}

pub(crate) async fn list_inventory_devices(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let organization_id = params.required_str("organization_id")?;
    let limit = limit(params)?;
    let devices = executor
        .paginate(
            &endpoints::ORG_INVENTORY_DEVICES,
            &[("organization_id", organization_id.as_str())],
            Some(limit),
            Vec::new(),
        )
        .await?;

    let summary = json!({
        "total_devices": devices.len(),
        "organization_id": organization_id,
    });
    Ok(ActionOutput::new(devices, summary))
}

pub(crate) async fn claim_device(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let organization_id = params.required_str("organization_id")?;
    let serials = params.json_or_comma_list("serials")?;

    mutate(
        executor,
        &endpoints::CLAIM_DEVICES,
        &[("organization_id", organization_id.as_str())],
        json!({ "serials": serials }),
    )
    .await?;

    let summary = json!({ "total_devices_claimed": serials.len() });
    Ok(ActionOutput::new(
        vec![json!({
            "organization_id": organization_id,
            "serials": serials,
            "claimed": true,
        })],
        summary,
    ))
}
