//! The connectivity test.

use crate::actions::{ActionError, ActionOutput};
use crate::auth::validate_credentials;
use crate::clients::CallExecutor;

pub(crate) async fn test_connectivity(executor: &CallExecutor) -> Result<ActionOutput, ActionError> {
    tracing::info!("Connecting to the Meraki Dashboard API");
    validate_credentials(executor)
        .await
        .map_err(ActionError::Connectivity)?;
    Ok(ActionOutput::default().with_message("Test Connectivity Passed"))
}
