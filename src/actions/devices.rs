//! Device actions: search, list, update and remove.

use serde_json::{json, Map, Value};

use crate::actions::{
    fetch_list, limit_to_usize, mutate, ActionError, ActionOutput, ActionParams, ParamError,
};
use crate::clients::constants::MAX_PAGE_SIZE;
use crate::clients::{CallExecutor, QueryParams};
use crate::rest::endpoints;

const SEARCH_FIELDS: &[&str] = &["mac", "serial", "model"];

pub(crate) async fn search_devices(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let organization_id = params.required_str("organization_id")?;

    let mut query = QueryParams::new();
    let mut criteria = vec![format!("organization_id: {organization_id}")];
    for field in SEARCH_FIELDS {
        if let Some(value) = params.optional_str(field) {
            criteria.push(format!("{field}: {value}"));
            query.push(((*field).to_string(), value));
        }
    }
    let tags = params.comma_list("tags");
    if !tags.is_empty() {
        criteria.push(format!("tags: {}", tags.join(", ")));
        query.extend(tags.into_iter().map(|tag| ("tags[]".to_string(), tag)));
    }

    let limit = params
        .optional_int_in_range("limit", 1, 100_000)?
        .and_then(limit_to_usize)
        .unwrap_or(MAX_PAGE_SIZE);

    let devices = executor
        .paginate(
            &endpoints::SEARCH_ORG_DEVICES,
            &[("organization_id", organization_id.as_str())],
            Some(limit),
            query,
        )
        .await?;

    let summary = json!({
        "total_devices_found": devices.len(),
        "search_criteria": criteria.join(", "),
    });
    Ok(ActionOutput::new(devices, summary))
}

pub(crate) async fn list_network_devices(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let network_id = params.required_str("network_id")?;
    let devices = fetch_list(
        executor,
        &endpoints::LIST_NETWORK_DEVICES,
        &[("network_id", network_id.as_str())],
        Vec::new(),
    )
    .await?;

    let summary = json!({ "total_devices": devices.len() });
    Ok(ActionOutput::new(devices, summary))
}

pub(crate) async fn update_device(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let serial = params.required_str("serial")?;

    let mut update = Map::new();
    for field in ["name", "address", "notes"] {
        if let Some(value) = params.optional_str(field) {
            update.insert(field.to_string(), Value::String(value));
        }
    }
    let tags = params.comma_list("tags");
    if !tags.is_empty() {
        update.insert("tags".to_string(), json!(tags));
    }
    if update.is_empty() {
        return Err(ParamError::MissingAny {
            keys: "name, tags, address, notes",
        }
        .into());
    }

    let device = mutate(
        executor,
        &endpoints::UPDATE_DEVICE,
        &[("serial", serial.as_str())],
        Value::Object(update),
    )
    .await?;

    let summary = json!({ "device_updated": true, "serial": serial });
    Ok(ActionOutput::new(vec![device], summary))
}

pub(crate) async fn remove_device(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let network_id = params.required_str("network_id")?;
    let serial = params.required_str("serial")?;

    mutate(
        executor,
        &endpoints::REMOVE_NETWORK_DEVICE,
        &[("network_id", network_id.as_str())],
        json!({ "serial": serial }),
    )
    .await?;

    let summary = json!({ "device_removed": true, "serial": serial });
    Ok(ActionOutput::new(
        vec![json!({
            "network_id": network_id,
            "serial": serial,
            "removed": true,
        })],
        summary,
    ))
}
