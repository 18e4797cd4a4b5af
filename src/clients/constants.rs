//! Fixed protocol constants for the Dashboard API.

use std::time::Duration;

/// Version prefix appended to the configured base URL.
pub const API_PATH: &str = "/api/v1";

/// Request header carrying the API key.
pub const AUTH_HEADER: &str = "X-Cisco-Meraki-API-Key";

/// Maximum number of attempts for a single logical call (429 retries only).
pub const MAX_RETRIES: u32 = 3;

/// Back-off used when a 429 response has no usable `Retry-After` header.
pub const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Longest back-off honoured from a `Retry-After` header; larger values are
/// capped.
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Per-attempt request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest page the Dashboard API serves for list endpoints.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Status codes for which an empty body is a success.
pub const EMPTY_RESPONSE_STATUS_CODES: &[u16] = &[200, 204];

/// Query parameter carrying the page size.
pub const PAGE_SIZE_PARAM: &str = "perPage";

/// Query parameter carrying the forward pagination cursor.
pub const STARTING_AFTER_PARAM: &str = "startingAfter";

/// Product token sent in the `User-Agent` header.
pub const USER_AGENT: &str = "Meraki Connector";

/// Connector version from Cargo.toml.
pub const CONNECTOR_VERSION: &str = env!("CARGO_PKG_VERSION");
