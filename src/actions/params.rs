//! Validated access to action parameters.
//!
//! The host platform passes parameters as a JSON object whose values are
//! usually strings, sometimes numbers or arrays. [`ActionParams`] reads them
//! with the same leniency: blank strings count as missing, integers may be
//! numeric strings, and lists may be JSON arrays or comma-separated text.

use serde_json::Value;
use thiserror::Error;

/// A parameter failed validation. No request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// A required parameter is absent or blank.
    #[error("Please provide a valid value for '{key}'")]
    Missing {
        /// The parameter name.
        key: &'static str,
    },

    /// A parameter is not an integer.
    #[error("Please provide a valid integer value in the '{key}' parameter")]
    InvalidInteger {
        /// The parameter name.
        key: &'static str,
    },

    /// An integer parameter is outside its allowed range.
    #[error("Parameter '{key}' must be between {min} and {max}")]
    OutOfRange {
        /// The parameter name.
        key: &'static str,
        /// Smallest allowed value.
        min: i64,
        /// Largest allowed value.
        max: i64,
    },

    /// None of a group of alternative parameters was given.
    #[error("At least one of the parameters ({keys}) must be provided")]
    MissingAny {
        /// The alternatives, comma separated.
        keys: &'static str,
    },

    /// A JSON-encoded parameter could not be parsed.
    #[error("Invalid JSON in {key} parameter")]
    InvalidJson {
        /// The parameter name.
        key: &'static str,
    },

    /// The rules parameter is not a list of objects.
    #[error("Rules must be a list of rule objects")]
    NotARuleList,

    /// A firewall rule failed validation.
    #[error("Invalid rule: {reason}")]
    InvalidRule {
        /// What is wrong with the rule.
        reason: String,
    },
}

/// The parameters of one action invocation.
///
/// # Example
///
/// ```rust
/// use meraki_connector::actions::ActionParams;
/// use serde_json::json;
///
/// let value = json!({"serial": " Q2XX-AAAA ", "timespan": "600", "tags": "a, b,,c"});
/// let params = ActionParams::new(&value);
///
/// assert_eq!(params.required_str("serial").unwrap(), "Q2XX-AAAA");
/// assert_eq!(params.optional_int_in_range("timespan", 300, 2_592_000).unwrap(), Some(600));
/// assert_eq!(params.comma_list("tags"), vec!["a", "b", "c"]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ActionParams<'a> {
    params: &'a Value,
}

impl<'a> ActionParams<'a> {
    /// Wraps the parameter object. A non-object value has no parameters.
    #[must_use]
    pub const fn new(params: &'a Value) -> Self {
        Self { params }
    }

    fn raw(&self, key: &str) -> Option<&'a Value> {
        self.params.get(key).filter(|value| !value.is_null())
    }

    /// Returns a string parameter, trimmed. Numbers are rendered as text.
    /// Blank values are `None`.
    #[must_use]
    pub fn optional_str(&self, key: &str) -> Option<String> {
        match self.raw(key)? {
            Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns a required string parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Missing`] if the parameter is absent or blank.
    pub fn required_str(&self, key: &'static str) -> Result<String, ParamError> {
        self.optional_str(key).ok_or(ParamError::Missing { key })
    }

    /// Returns an optional integer parameter constrained to `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidInteger`] if the value is not an integer,
    /// or [`ParamError::OutOfRange`] if it is outside the range.
    pub fn optional_int_in_range(
        &self,
        key: &'static str,
        min: i64,
        max: i64,
    ) -> Result<Option<i64>, ParamError> {
        let value = match self.raw(key) {
            None => return Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| ParamError::InvalidInteger { key })?,
            Some(Value::Number(n)) => n.as_i64().ok_or(ParamError::InvalidInteger { key })?,
            Some(_) => return Err(ParamError::InvalidInteger { key }),
        };

        if (min..=max).contains(&value) {
            Ok(Some(value))
        } else {
            Err(ParamError::OutOfRange { key, min, max })
        }
    }

    /// Returns the items of a comma-separated parameter, trimmed, with empty
    /// items dropped. An array of strings is accepted as-is.
    #[must_use]
    pub fn comma_list(&self, key: &str) -> Vec<String> {
        match self.raw(key) {
            Some(Value::String(s)) => split_comma_list(s),
            Some(Value::Array(items)) => string_items(items),
            _ => Vec::new(),
        }
    }

    /// Returns a required list given as a JSON array, a JSON-encoded array
    /// string or comma-separated text.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Missing`] if the list is absent or empty.
    pub fn json_or_comma_list(&self, key: &'static str) -> Result<Vec<String>, ParamError> {
        let items = match self.raw(key) {
            Some(Value::Array(items)) => string_items(items),
            Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Array(items)) => string_items(&items),
                _ => split_comma_list(s),
            },
            _ => Vec::new(),
        };

        if items.is_empty() {
            return Err(ParamError::Missing { key });
        }
        Ok(items)
    }

    /// Returns a required list of rule objects, given as a JSON array or a
    /// JSON-encoded string.
    ///
    /// # Errors
    ///
    /// - [`ParamError::Missing`] if the parameter is absent, blank or empty
    /// - [`ParamError::InvalidJson`] if a string value is not valid JSON
    /// - [`ParamError::NotARuleList`] if the value is not a list of objects
    pub fn rule_list(&self, key: &'static str) -> Result<Vec<Value>, ParamError> {
        let value = match self.raw(key) {
            None => return Err(ParamError::Missing { key }),
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(ParamError::Missing { key })
            }
            Some(Value::String(s)) => {
                serde_json::from_str::<Value>(s).map_err(|_| ParamError::InvalidJson { key })?
            }
            Some(other) => other.clone(),
        };

        let Value::Array(rules) = value else {
            return Err(ParamError::NotARuleList);
        };
        if rules.is_empty() {
            return Err(ParamError::Missing { key });
        }
        if !rules.iter().all(Value::is_object) {
            return Err(ParamError::NotARuleList);
        }
        Ok(rules)
    }
}

fn split_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn string_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|item| !item.is_empty())
        .collect()
}
