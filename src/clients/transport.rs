//! The HTTP transport seam.
//!
//! [`Transport`] sends one fully-formed [`HttpRequest`] and returns the
//! [`RawResponse`]. It knows nothing about authentication, retries or
//! classification; those live in the executor. [`ReqwestTransport`] is the
//! production implementation. Tests substitute their own.

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::RawResponse;

/// Sends a single HTTP request.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Sends `request` and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no HTTP response was received
    /// (connection refused, DNS or TLS failure, timeout).
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest` client using rustls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport.
    ///
    /// When `verify_server_cert` is `false`, invalid server certificates are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the TLS backend cannot be initialised.
    pub fn new(verify_server_cert: bool) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(!verify_server_cert)
            .build()?;
        Ok(Self { client })
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        let url = request.url.as_str();
        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.timeout(request.timeout).send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(RawResponse::new(code, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_applies_method_headers_query_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/devices/Q2XX"))
            .and(header("X-Test", "yes"))
            .and(query_param("perPage", "10"))
            .and(body_json(json!({"name": "ap"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "application/json")
                    .set_body_string(r#"{"serial":"Q2XX"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(true).unwrap();
        let request = HttpRequest::builder(
            HttpMethod::Put,
            format!("{}/api/v1/devices/Q2XX", server.uri()),
        )
        .header("X-Test", "yes")
        .query_param("perPage", "10")
        .body(json!({"name": "ap"}))
        .build()
        .unwrap();

        let response = transport.send(&request).await.unwrap();
        assert_eq!(response.code, 200);
        assert_eq!(response.content_type(), "application/json");
        assert_eq!(response.body, r#"{"serial":"Q2XX"}"#);
    }

    #[tokio::test]
    async fn test_send_keeps_repeated_query_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("tags[]", "a"))
            .and(query_param("tags[]", "b"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(true).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, format!("{}/x", server.uri()))
            .query_param("tags[]", "a")
            .query_param("tags[]", "b")
            .build()
            .unwrap();

        let response = transport.send(&request).await.unwrap();
        assert_eq!(response.code, 204);
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_send_reports_connection_failure() {
        let transport = ReqwestTransport::new(true).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "http://127.0.0.1:1/unreachable")
            .build()
            .unwrap();

        let error = transport.send(&request).await.unwrap_err();
        assert!(!error.message.is_empty());
    }
}
