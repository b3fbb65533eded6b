//! Parsing and shape-checking of raw search response bodies
//!
//! Bodies are parsed from text on purpose: a tunnel or proxy in front of the
//! backend answers with an HTML page when something is wrong, and that case
//! has to be told apart from a network failure.

use crate::error::{Error, Result};
use crate::model::Coordinates;
use serde_json::Value;
use tracing::{error, warn};

/// Fields every search result item is expected to carry
pub const REQUIRED_FIELDS: [&str; 4] = ["id", "latitude", "longitude", "url"];

/// Parse a response body into its array of items
///
/// Non-JSON bodies and JSON that is not an array are `MalformedResponse`.
pub fn parse_items(body: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        let err = Error::malformed(e.to_string(), body);
        error!("Response was not valid JSON: {}", err);
        err
    })?;

    match value {
        Value::Array(items) => Ok(items),
        other => {
            let err = Error::malformed(
                format!("expected a JSON array, got {}", json_kind(&other)),
                body,
            );
            error!("Unexpected response shape: {}", err);
            Err(err)
        }
    }
}

/// Check every item for the required fields
///
/// Returns false (after logging a warning) when any item is missing one.
/// Callers carry on with a best-effort mapping either way.
pub fn check_shape(items: &[Value], endpoint: &str) -> bool {
    let mismatched: Vec<&Value> = items
        .iter()
        .filter(|item| {
            REQUIRED_FIELDS
                .iter()
                .any(|field| item.get(field).is_none())
        })
        .collect();

    match mismatched.first() {
        None => true,
        Some(example) => {
            warn!(
                endpoint,
                mismatched = mismatched.len(),
                total = items.len(),
                "Items do not match the expected {{id, latitude, longitude, url}} shape; first offender: {}",
                example
            );
            false
        }
    }
}

/// Read a field as a string, accepting numbers too
pub fn string_field(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a non-empty string field
pub fn non_empty_string(item: &Value, key: &str) -> Option<String> {
    string_field(item, key).filter(|s| !s.trim().is_empty())
}

/// Read a field as a float, accepting numeric strings too
pub fn number_field(item: &Value, key: &str) -> Option<f64> {
    match item.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read and validate an item's latitude/longitude
pub fn read_position(item: &Value) -> Option<Coordinates> {
    let position = Coordinates::new(
        number_field(item, "latitude")?,
        number_field(item, "longitude")?,
    );
    position.validate().ok().map(|_| position)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
