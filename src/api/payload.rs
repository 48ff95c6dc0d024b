//! Request input validation.
//!
//! # Responsibilities
//! - Parse JSON bodies without trusting the content type
//! - Apply the truthiness rule to required fields
//! - Parse query parameters and document identifiers
//!
//! # Design Decisions
//! - A field is present only if it is truthy: `null`, `false`, `0`, `""` and
//!   absent all count as missing
//! - A truthy field of the wrong JSON type is treated like a missing one
//! - A repeated query key resolves to its first value

use bson::oid::ObjectId;
use serde_json::{Number, Value};

use crate::api::error::ApiError;

/// Parse a request body as JSON.
pub fn parse_body(bytes: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(bytes).map_err(|_| ApiError::BadBody)
}

/// JavaScript-style truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The value of `field` if present and truthy.
pub fn truthy_field<'a>(body: &'a Value, field: &str) -> Option<&'a Value> {
    body.get(field).filter(|v| is_truthy(v))
}

/// A required, non-empty string field.
pub fn required_str(body: &Value, field: &str) -> Result<String, ApiError> {
    truthy_field(body, field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(ApiError::BadBody)
}

/// A required, non-zero number field. Fractions are accepted.
pub fn required_number(body: &Value, field: &str) -> Result<Number, ApiError> {
    match truthy_field(body, field) {
        Some(Value::Number(n)) => Ok(n.clone()),
        _ => Err(ApiError::BadBody),
    }
}

/// Decoded query string pairs, in request order.
pub type QueryPairs = Vec<(String, String)>;

/// The first value of `key`. Later repeats are ignored.
pub fn first_param(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// A required query parameter. Empty values count as missing.
pub fn required_param(value: Option<String>) -> Result<String, ApiError> {
    value.filter(|v| !v.is_empty()).ok_or(ApiError::MissingParameter)
}

/// Parse a 24-char hex document identifier.
pub fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidId)
}

/// An optional list of identifiers. Absent or `null` yields an empty list.
pub fn id_list(body: &Value, field: &str) -> Result<Vec<ObjectId>, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().ok_or(ApiError::InvalidId).and_then(parse_id))
            .collect(),
        Some(_) => Err(ApiError::BadBody),
    }
}
