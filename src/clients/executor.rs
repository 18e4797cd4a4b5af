//! Rate-limited call execution.
//!
//! [`CallExecutor`] performs one logical Dashboard API call: it resolves the
//! endpoint, attaches authentication, sends the request through a
//! [`Transport`], retries on HTTP 429 and classifies the final response.
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Sleeps for the `Retry-After` header value, or
//!   the initial delay when it is absent or invalid, then retries
//! - **401 (Unauthorized)**: Returns [`AuthError::InvalidCredential`] at once
//! - **Transport failures**: Returned at once, never retried
//! - **Everything else**: Classified without retry
//!
//! At most [`RetryPolicy::max_attempts`] requests are sent per call. Attempts
//! are strictly sequential.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::auth::{AuthError, Authenticator};
use crate::clients::classify::{classify, Outcome};
use crate::clients::constants::{
    API_PATH, CONNECTOR_VERSION, INITIAL_RETRY_DELAY, MAX_RETRIES, REQUEST_TIMEOUT, USER_AGENT,
};
use crate::clients::errors::CallError;
use crate::clients::http_request::{HttpRequest, QueryParams};
use crate::clients::http_response::ApiResponse;
use crate::clients::transport::{ReqwestTransport, Transport};
use crate::config::{BaseUrl, ConnectorConfig};
use crate::rest::Endpoint;

/// Retry settings for HTTP 429 responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of requests per logical call (at least 1).
    pub max_attempts: u32,
    /// Delay used when `Retry-After` is absent or invalid.
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// Creates a retry policy. `max_attempts` is raised to 1 if zero.
    #[must_use]
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
            initial_delay: INITIAL_RETRY_DELAY,
        }
    }
}

/// Executes Dashboard API calls with authentication and 429 retries.
///
/// # Thread Safety
///
/// `CallExecutor` is `Send + Sync`. Each call still runs its attempts one
/// after another.
///
/// # Example
///
/// ```rust,ignore
/// use meraki_connector::clients::CallExecutor;
/// use meraki_connector::rest::endpoints;
/// use meraki_connector::ConnectorConfig;
///
/// let executor = CallExecutor::new(&config)?;
/// let devices = executor
///     .call(
///         &endpoints::LIST_NETWORK_DEVICES,
///         &[("network_id", "N_1234")],
///         None,
///         Vec::new(),
///     )
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct CallExecutor {
    transport: Arc<dyn Transport>,
    authenticator: Authenticator,
    base_url: BaseUrl,
    user_agent: String,
    retry_policy: RetryPolicy,
    timeout: Duration,
}

// Verify CallExecutor is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CallExecutor>();
};

impl CallExecutor {
    /// Creates an executor backed by [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ConnectorConfig) -> Result<Self, CallError> {
        let transport = ReqwestTransport::new(config.verify_server_cert())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates an executor that sends requests through `transport`.
    #[must_use]
    pub fn with_transport(config: &ConnectorConfig, transport: Arc<dyn Transport>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}{USER_AGENT} v{CONNECTOR_VERSION} | Rust {rust_version}");

        Self {
            transport,
            authenticator: Authenticator::from_config(config),
            base_url: config.base_url().clone(),
            user_agent,
            retry_policy: RetryPolicy::default(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Replaces the per-attempt timeout (default: 30 seconds).
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the authenticator.
    #[must_use]
    pub const fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Performs one logical call and returns the decoded payload.
    ///
    /// # Errors
    ///
    /// See [`CallExecutor::execute`].
    pub async fn call(
        &self,
        endpoint: &Endpoint,
        path_params: &[(&str, &str)],
        body: Option<Value>,
        query: QueryParams,
    ) -> Outcome {
        self.execute(endpoint, path_params, body, query)
            .await
            .map(|response| response.body)
    }

    /// Performs one logical call and returns the classified response,
    /// including pagination links.
    ///
    /// # Errors
    ///
    /// - [`CallError::Config`] if a path placeholder cannot be resolved
    /// - [`CallError::Auth`] if no key is configured (nothing is sent) or
    ///   the API answers 401
    /// - [`CallError::Transport`] if the request could not be sent
    /// - [`CallError::RateLimited`] if every attempt got HTTP 429
    /// - [`CallError::Business`] / [`CallError::Protocol`] from classification
    pub async fn execute(
        &self,
        endpoint: &Endpoint,
        path_params: &[(&str, &str)],
        body: Option<Value>,
        query: QueryParams,
    ) -> Result<ApiResponse, CallError> {
        let path = endpoint.resolve(path_params)?;
        let url = format!("{}{API_PATH}{path}", self.base_url);

        let mut headers = self.authenticator.headers()?;
        headers.insert("User-Agent".to_string(), self.user_agent.clone());

        let mut builder = HttpRequest::builder(endpoint.method, url)
            .headers(headers)
            .query(query)
            .timeout(self.timeout);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let request = builder.build()?;

        let max_attempts = self.retry_policy.max_attempts;
        for attempt in 1..=max_attempts {
            tracing::debug!(
                method = %request.http_method,
                url = %request.url,
                attempt,
                "Sending Dashboard API request"
            );

            let response = self.transport.send(&request).await.map_err(|e| {
                tracing::debug!(error = %e, "Transport failure");
                CallError::from(e)
            })?;

            tracing::debug!(
                status = response.code,
                request_id = response.request_id().unwrap_or_default(),
                "Received response"
            );

            match response.code {
                429 => {
                    if attempt < max_attempts {
                        let delay = response
                            .retry_after()
                            .unwrap_or(self.retry_policy.initial_delay);
                        tracing::warn!(
                            "Rate limited. Retrying after {:?}. Retry {}/{}",
                            delay,
                            attempt,
                            max_attempts
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
                401 => return Err(AuthError::InvalidCredential.into()),
                code => {
                    let pagination = response.pagination();
                    let body = classify(&response)?;
                    return Ok(ApiResponse {
                        code,
                        body,
                        pagination,
                    });
                }
            }
        }

        tracing::warn!(tries = max_attempts, "Max retries exceeded for rate limiting");
        Err(CallError::RateLimited {
            tries: max_attempts,
        })
    }
}
