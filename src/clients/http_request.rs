//! HTTP request types for the Dashboard API.
//!
//! This module provides the [`HttpRequest`] type and its builder. A request is
//! built fresh for every logical call and carries everything the transport
//! needs: method, absolute URL, headers, query pairs, JSON body and timeout.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::clients::constants::REQUEST_TIMEOUT;
use crate::clients::errors::InvalidHttpRequestError;

/// Ordered query parameters. Keys may repeat (e.g. `tags[]`).
pub type QueryParams = Vec<(String, String)>;

/// Header name to value mapping.
pub type HeaderSet = HashMap<String, String>;

/// HTTP methods supported by the Dashboard API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if requests with this method must carry a body.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Replaces every occurrence of `key` in `query` with a single `key=value`.
pub fn set_query_param(query: &mut QueryParams, key: &str, value: impl Into<String>) {
    query.retain(|(k, _)| k != key);
    query.push((key.to_string(), value.into()));
}

/// An HTTP request to be sent to the Dashboard API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use meraki_connector::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(
///     HttpMethod::Put,
///     "https://api.meraki.com/api/v1/devices/Q2XX-AAAA-BBBB",
/// )
/// .body(json!({"name": "lobby-ap"}))
/// .build()
/// .unwrap();
///
/// assert_eq!(request.http_method, HttpMethod::Put);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URL for this request.
    pub url: String,
    /// Headers to send.
    pub headers: HeaderSet,
    /// Query parameters to append to the URL, in order.
    pub query: QueryParams,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Timeout for this single attempt.
    pub timeout: Duration,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] if the method is
    /// `Post` or `Put` and no body is set.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }
        Ok(())
    }

    /// Returns the first value of query parameter `key`, if present.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    headers: HeaderSet,
    query: QueryParams,
    body: Option<serde_json::Value>,
    timeout: Duration,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            headers: HeaderSet::new(),
            query: QueryParams::new(),
            body: None,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Merges the given headers into the request.
    #[must_use]
    pub fn headers(mut self, headers: HeaderSet) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Appends query parameters, keeping their order.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query.extend(query);
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the per-attempt timeout (default: 30 seconds).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            url: self.url,
            headers: self.headers,
            query: self.query,
            body: self.body,
            timeout: self.timeout,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "https://h/api/v1/organizations")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.url, "https://h/api/v1/organizations");
        assert!(request.body.is_none());
        assert!(request.query.is_empty());
        assert_eq!(request.timeout, REQUEST_TIMEOUT);
    }

    #[test]
    fn test_verify_requires_body_for_post_and_put() {
        let result = HttpRequest::builder(HttpMethod::Post, "https://h/x").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "post"
        ));

        let result = HttpRequest::builder(HttpMethod::Put, "https://h/x").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "put"
        ));
    }

    #[test]
    fn test_delete_does_not_require_body() {
        let request = HttpRequest::builder(HttpMethod::Delete, "https://h/x").build();
        assert!(request.is_ok());
    }

    #[test]
    fn test_query_keeps_repeated_keys_in_order() {
        let request = HttpRequest::builder(HttpMethod::Get, "https://h/x")
            .query_param("tags[]", "a")
            .query_param("tags[]", "b")
            .query_param("model", "MR46")
            .build()
            .unwrap();

        assert_eq!(
            request.query,
            vec![
                ("tags[]".to_string(), "a".to_string()),
                ("tags[]".to_string(), "b".to_string()),
                ("model".to_string(), "MR46".to_string()),
            ]
        );
        assert_eq!(request.query_value("tags[]"), Some("a"));
    }

    #[test]
    fn test_set_query_param_replaces_existing_values() {
        let mut query = vec![
            ("perPage".to_string(), "5".to_string()),
            ("mac".to_string(), "aa".to_string()),
            ("perPage".to_string(), "7".to_string()),
        ];
        set_query_param(&mut query, "perPage", "1000");

        assert_eq!(
            query,
            vec![
                ("mac".to_string(), "aa".to_string()),
                ("perPage".to_string(), "1000".to_string()),
            ]
        );
    }

    #[test]
    fn test_builder_with_headers_and_body() {
        let request = HttpRequest::builder(HttpMethod::Post, "https://h/x")
            .header("Accept", "application/json")
            .body(json!({"serials": ["Q2XX"]}))
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(
            request.headers.get("Accept"),
            Some(&"application/json".to_string())
        );
        assert_eq!(request.body, Some(json!({"serials": ["Q2XX"]})));
        assert_eq!(request.timeout, Duration::from_secs(5));
    }
}
