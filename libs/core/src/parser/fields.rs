//! Typed property accessors over JSON objects.

use serde_json::{Map, Value};

use crate::error::ParseError;

pub type Object = Map<String, Value>;

pub fn as_object<'v>(value: &'v Value, what: &str) -> Result<&'v Object, ParseError> {
    value
        .as_object()
        .ok_or_else(|| ParseError::invalid(what, "expected a json object"))
}

/// Non-empty string property, `None` when absent, empty or not a string.
pub fn optional_string(obj: &Object, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn required_string(obj: &Object, key: &str) -> Result<String, ParseError> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(ParseError::missing(key)),
        Some(Value::String(s)) if s.is_empty() => Err(ParseError::missing(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ParseError::invalid(key, "expected a string")),
    }
}

pub fn bool_or(obj: &Object, key: &str, default: bool) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Accepts either `"key": "url"` or `"key": { "url": "..." }`.
pub fn url_property(obj: &Object, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(url) if !url.is_empty() => Some(url.clone()),
        Value::Object(inner) => optional_string(inner, "url"),
        _ => None,
    }
}

pub fn type_tag(obj: &Object) -> Option<&str> {
    obj.get("type").and_then(Value::as_str).filter(|t| !t.is_empty())
}
