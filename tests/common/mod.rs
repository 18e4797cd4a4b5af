//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use meraki_connector::clients::{HttpRequest, RawResponse, Transport, TransportError};
use meraki_connector::{ApiKey, BaseUrl, ConnectorConfig};

/// A transport that replays scripted responses and records every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<Vec<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<RawResponse>) -> Arc<Self> {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    pub fn with_results(mut responses: Vec<Result<RawResponse, TransportError>>) -> Arc<Self> {
        responses.reverse();
        Arc::new(Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(TransportError::new("no scripted response left")))
    }
}

pub fn response(code: u16, headers: &[(&str, &str)], body: &str) -> RawResponse {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        map.entry((*name).to_string())
            .or_default()
            .push((*value).to_string());
    }
    RawResponse::new(code, map, body)
}

pub fn json_response(code: u16, body: &str) -> RawResponse {
    response(code, &[("Content-Type", "application/json")], body)
}

pub fn rate_limited(retry_after: Option<&str>) -> RawResponse {
    match retry_after {
        Some(value) => response(429, &[("Retry-After", value)], ""),
        None => response(429, &[], ""),
    }
}

/// Configuration pointing at `base_url` with a test key.
pub fn config(base_url: &str) -> ConnectorConfig {
    ConnectorConfig::builder()
        .api_key(ApiKey::new("test-api-key").unwrap())
        .base_url(BaseUrl::new(base_url).unwrap())
        .build()
        .unwrap()
}

/// Configuration pointing at `base_url` without an API key.
pub fn config_without_key(base_url: &str) -> ConnectorConfig {
    ConnectorConfig::builder()
        .base_url(BaseUrl::new(base_url).unwrap())
        .build()
        .unwrap()
}
