//! Link-header pagination for list endpoints.
//!
//! List endpoints page with `perPage` and a `startingAfter` cursor advertised
//! in the `Link` header. [`CallExecutor::paginate`] requests the first page
//! with the largest useful page size, then follows `rel=next` links until
//! the limit is met or no next page is advertised.

use std::collections::HashSet;

use serde_json::Value;

use crate::clients::constants::{MAX_PAGE_SIZE, PAGE_SIZE_PARAM, STARTING_AFTER_PARAM};
use crate::clients::errors::CallError;
use crate::clients::executor::CallExecutor;
use crate::clients::http_request::{set_query_param, QueryParams};
use crate::rest::Endpoint;

/// Returns the `perPage` value for a limit. `None` or zero means no limit.
#[must_use]
pub fn page_size(limit: Option<usize>) -> usize {
    limit
        .filter(|limit| *limit > 0)
        .map_or(MAX_PAGE_SIZE, |limit| limit.min(MAX_PAGE_SIZE))
}

impl CallExecutor {
    /// Fetches the items of a list endpoint.
    ///
    /// `perPage` is set to `min(limit, 1000)` (1000 without a limit) and
    /// replaces any caller-supplied value. Pages are fetched one after
    /// another; the result is truncated to `limit`.
    ///
    /// # Errors
    ///
    /// Returns the first failing page's [`CallError`] unchanged, or
    /// [`CallError::Protocol`] ("Unexpected response format from server")
    /// when a page is not a JSON array.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let organizations = executor
    ///     .paginate(&endpoints::LIST_ORGANIZATIONS, &[], Some(50), Vec::new())
    ///     .await?;
    /// assert!(organizations.len() <= 50);
    /// ```
    pub async fn paginate(
        &self,
        endpoint: &Endpoint,
        path_params: &[(&str, &str)],
        limit: Option<usize>,
        query: QueryParams,
    ) -> Result<Vec<Value>, CallError> {
        let limit = limit.filter(|limit| *limit > 0);
        let mut query = query;
        set_query_param(&mut query, PAGE_SIZE_PARAM, page_size(limit).to_string());

        let mut items = Vec::new();
        let mut seen_cursors = HashSet::new();

        loop {
            let response = self
                .execute(endpoint, path_params, None, query.clone())
                .await?;

            let Some(Value::Array(page)) = response.body else {
                return Err(CallError::unexpected_format(response.code));
            };

            tracing::debug!(
                endpoint = %endpoint,
                page_items = page.len(),
                total = items.len() + page.len(),
                "Fetched page"
            );

            let page_was_empty = page.is_empty();
            items.extend(page);

            if let Some(limit) = limit {
                if items.len() >= limit {
                    items.truncate(limit);
                    break;
                }
            }

            if page_was_empty {
                break;
            }

            let Some(cursor) = response.pagination.next_starting_after else {
                break;
            };
            if !seen_cursors.insert(cursor.clone()) {
                tracing::warn!(cursor = %cursor, "Pagination cursor repeated; stopping");
                break;
            }
            set_query_param(&mut query, STARTING_AFTER_PARAM, cursor);
        }

        Ok(items)
    }
}
