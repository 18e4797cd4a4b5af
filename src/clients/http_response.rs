//! HTTP response types for the Dashboard API.
//!
//! [`RawResponse`] is what the transport hands back: status, headers and the
//! undecoded body. [`ApiResponse`] is the classified result the executor
//! returns on success, with the JSON body decoded and the `Link` header
//! parsed into [`PaginationInfo`].

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::constants::{MAX_RETRY_AFTER, STARTING_AFTER_PARAM};

/// The forward pagination cursor parsed from the `Link` header.
///
/// The Dashboard API paginates list endpoints with a `startingAfter` cursor
/// embedded in the `Link` header URLs:
///
/// ```text
/// <https://api.meraki.com/api/v1/organizations?perPage=3&startingAfter=a>; rel=first,
/// <https://api.meraki.com/api/v1/organizations?perPage=3&startingAfter=c>; rel=next
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationInfo {
    /// The full URL of the next page, if any.
    pub next_url: Option<String>,
    /// The `startingAfter` cursor for the next page.
    pub next_starting_after: Option<String>,
}

impl PaginationInfo {
    /// Parses pagination info from a Link header value.
    ///
    /// Both quoted (`rel="next"`) and bare (`rel=next`) relation values are
    /// accepted.
    #[must_use]
    pub fn parse_link_header(header_value: &str) -> Self {
        let mut result = Self::default();

        for link in header_value.split(',') {
            let link = link.trim();

            let rel = link.split(';').skip(1).find_map(|part| {
                part.trim()
                    .strip_prefix("rel=")
                    .map(|rel| rel.trim_matches('"'))
            });

            let url = link
                .split(';')
                .next()
                .map(|s| s.trim().trim_start_matches('<').trim_end_matches('>'));

            if let (Some("next"), Some(url)) = (rel, url) {
                result.next_starting_after = Self::extract_param(url, STARTING_AFTER_PARAM);
                result.next_url = Some(url.to_string());
            }
        }

        result
    }

    /// Extracts and percent-decodes a query parameter from a URL.
    fn extract_param(url: &str, name: &str) -> Option<String> {
        let query_start = url.find('?')?;
        let query = &url[query_start + 1..];

        query.split('&').find_map(|param| {
            let mut parts = param.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if key == name => urlencoding::decode(value)
                    .map(std::borrow::Cow::into_owned)
                    .ok(),
                _ => None,
            }
        })
    }
}

/// A raw HTTP response as received by the transport.
///
/// Header names are stored lower-cased; a header may carry several values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (lower-cased names).
    pub headers: HashMap<String, Vec<String>>,
    /// The undecoded response body.
    pub body: String,
}

impl RawResponse {
    /// Creates a new `RawResponse`, normalising header names to lower case.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let mut normalized: HashMap<String, Vec<String>> = HashMap::new();
        for (name, values) in headers {
            normalized
                .entry(name.to_ascii_lowercase())
                .or_default()
                .extend(values);
        }
        Self {
            code,
            headers: normalized,
            body: body.into(),
        }
    }

    /// Returns `true` if the status code is in the 200–399 range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 399
    }

    /// Returns `true` if the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the first value of a header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Content-Type` header, or an empty string.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or_default()
    }

    /// Parses the `Retry-After` header as a number of seconds, capped at
    /// [`MAX_RETRY_AFTER`].
    ///
    /// Returns `None` if the header is absent, negative, non-finite or not a
    /// number.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(|secs| Duration::from_secs_f64(secs.min(MAX_RETRY_AFTER.as_secs_f64())))
    }

    /// Parses every `Link` header value into the pagination cursor.
    #[must_use]
    pub fn pagination(&self) -> PaginationInfo {
        self.headers
            .get("link")
            .map(|values| PaginationInfo::parse_link_header(&values.join(",")))
            .unwrap_or_default()
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }
}

/// A successfully classified API response.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The decoded body; `None` for an empty success body.
    pub body: Option<serde_json::Value>,
    /// Pagination cursors from the `Link` header.
    pub pagination: PaginationInfo,
}
