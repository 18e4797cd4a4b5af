//! Client actions: clients seen by a device, and organization client search.

use serde_json::{json, Value};

use crate::actions::{fetch_list, fetch_single, ActionError, ActionOutput, ActionParams};
use crate::clients::constants::PAGE_SIZE_PARAM;
use crate::clients::{CallExecutor, QueryParams};
use crate::rest::endpoints;

/// Five minutes to thirty days, in seconds.
const TIMESPAN_RANGE: (i64, i64) = (300, 2_592_000);

const SEARCH_PER_PAGE_RANGE: (i64, i64) = (3, 5);

pub(crate) async fn list_device_clients(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let serial = params.required_str("serial")?;
    let (min, max) = TIMESPAN_RANGE;
    let timespan = params.optional_int_in_range("timespan", min, max)?;

    let mut query = QueryParams::new();
    if let Some(timespan) = timespan {
        query.push(("timespan".to_string(), timespan.to_string()));
    }

    let clients = fetch_list(
        executor,
        &endpoints::LIST_DEVICE_CLIENTS,
        &[("serial", serial.as_str())],
        query,
    )
    .await?;

    let summary = json!({ "total_clients": clients.len() });
    Ok(ActionOutput::new(clients, summary))
}

pub(crate) async fn search_organization_clients(
    executor: &CallExecutor,
    params: &ActionParams<'_>,
) -> Result<ActionOutput, ActionError> {
    let organization_id = params.required_str("organization_id")?;
    let mac = params.required_str("mac")?;
    let (min, max) = SEARCH_PER_PAGE_RANGE;
    let per_page = params.optional_int_in_range("per_page", min, max)?;

    let mut query = vec![("mac".to_string(), mac)];
    if let Some(per_page) = per_page {
        query.push((PAGE_SIZE_PARAM.to_string(), per_page.to_string()));
    }

    let client = fetch_single(
        executor,
        &endpoints::SEARCH_ORG_CLIENTS,
        &[("organization_id", organization_id.as_str())],
        query,
    )
    .await?;

    let summary = json!({
        "client_id": client.get("clientId").cloned().unwrap_or_else(|| json!("")),
        "mac": client.get("mac").cloned().unwrap_or_else(|| json!("")),
        "total_records": client
            .get("records")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
    });
    Ok(ActionOutput::new(vec![client], summary))
}
