//! Response classification.
//!
//! [`classify`] turns a [`RawResponse`] into an [`Outcome`]. The rules are
//! applied in a fixed order:
//!
//! 1. Non-success status with a body: business failure carrying the server's
//!    error message (or the raw body when none can be extracted).
//! 2. Non-success status without a body: business failure.
//! 3. Empty body: success with no payload for 200/204, failure otherwise.
//! 4. JSON content type: decoded payload.
//! 5. HTML content type: failure carrying the page's visible text.
//! 6. Anything else: "Unknown response type".

use scraper::Html;
use serde_json::Value;

use crate::clients::constants::EMPTY_RESPONSE_STATUS_CODES;
use crate::clients::errors::CallError;
use crate::clients::http_response::RawResponse;

/// The result of a Dashboard API call.
///
/// The success side defaults to the decoded JSON payload, which is `None`
/// for an empty 200/204 response.
pub type Outcome<T = Option<Value>> = Result<T, CallError>;

const EMPTY_NOT_SUCCESS: &str = "Empty response and not in success status codes";
const ERROR_MESSAGE_UNAVAILABLE: &str = "Error message unavailable";
const UNKNOWN_RESPONSE_TYPE: &str = "Unknown response type";

/// Classifies a raw response.
///
/// # Errors
///
/// Returns [`CallError::Business`] for error responses from the API and
/// [`CallError::Protocol`] for responses that cannot be interpreted.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use meraki_connector::clients::{classify, RawResponse};
///
/// let response = RawResponse::new(204, HashMap::new(), "");
/// assert_eq!(classify(&response).unwrap(), None);
/// ```
pub fn classify(response: &RawResponse) -> Outcome {
    let status = response.code;

    if !response.is_ok() {
        if response.is_empty() {
            return Err(CallError::Business {
                status,
                message: EMPTY_NOT_SUCCESS.to_string(),
            });
        }
        let message = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|json| error_message(&json))
            .unwrap_or_else(|| response.body.clone());
        return Err(CallError::Business { status, message });
    }

    if response.is_empty() {
        if EMPTY_RESPONSE_STATUS_CODES.contains(&status) {
            return Ok(None);
        }
        return Err(CallError::Protocol {
            status: Some(status),
            message: EMPTY_NOT_SUCCESS.to_string(),
        });
    }

    let content_type = response.content_type();

    if content_type.contains("json") {
        return classify_json(response);
    }

    if content_type.contains("html") {
        return Err(CallError::Business {
            status,
            message: html_text(&response.body),
        });
    }

    Err(CallError::Protocol {
        status: Some(status),
        message: UNKNOWN_RESPONSE_TYPE.to_string(),
    })
}

fn classify_json(response: &RawResponse) -> Outcome {
    let json: Value = serde_json::from_str(&response.body).map_err(|e| CallError::Protocol {
        status: Some(response.code),
        message: format!("Unable to parse JSON response. Error: {e}"),
    })?;

    if response.is_ok() {
        return Ok(Some(json));
    }

    let message = json
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| first_error(&json).and_then(|e| e.get("message")).and_then(Value::as_str))
        .unwrap_or(ERROR_MESSAGE_UNAVAILABLE)
        .to_string();

    Err(CallError::Business {
        status: response.code,
        message,
    })
}

/// Extracts the server's error message from an error body.
///
/// Tries `error`, `message`, `errors[0].message`, a string `errors[0]`, then
/// all strings in `errors` joined with `"; "`.
fn error_message(json: &Value) -> Option<String> {
    let non_empty = |s: &&str| !s.is_empty();

    if let Some(text) = json.get("error").and_then(Value::as_str).filter(non_empty) {
        return Some(text.to_string());
    }
    if let Some(text) = json.get("message").and_then(Value::as_str).filter(non_empty) {
        return Some(text.to_string());
    }

    let first = first_error(json)?;
    if let Some(text) = first.get("message").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    if let Some(text) = first.as_str() {
        let joined = json
            .get("errors")
            .and_then(Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .unwrap_or_else(|| text.to_string());
        return Some(joined);
    }
    None
}

fn first_error(json: &Value) -> Option<&Value> {
    json.get("errors")?.as_array()?.first()
}

/// Returns the visible text of an HTML document, one trimmed line per row.
///
/// Braces are doubled so the text survives downstream format templates.
fn html_text(body: &str) -> String {
    let document = Html::parse_document(body);
    let text: String = document.root_element().text().collect();

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .replace('{', "{{")
        .replace('}', "}}")
}
