//! Checked field extraction over decoded JSON values.
//!
//! Every access to a decoded API response goes through these helpers so
//! that a missing field or a wrong type surfaces as
//! [`Error::MalformedResponse`] with a readable context instead of a
//! panic. The `context` argument names the value being read, e.g.
//! `"user.email"`.
//!
//! [`Error::MalformedResponse`]: crate::Error::MalformedResponse

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Returns a short name for a JSON value's kind, for error messages.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Extracts a field from a JSON object.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if the field is absent.
pub fn field<'a>(map: &'a Map<String, Value>, name: &str, context: &str) -> Result<&'a Value> {
    map.get(name)
        .ok_or_else(|| Error::malformed(format!("{context}: missing field {name:?}")))
}

/// Interprets a JSON value as an object.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if the value is not an object.
pub fn object<'a>(value: &'a Value, context: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::malformed(format!("{context}: expected an object, got {}", kind(value))))
}

/// Interprets a JSON value as an array.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if the value is not an array.
pub fn array<'a>(value: &'a Value, context: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| Error::malformed(format!("{context}: expected an array, got {}", kind(value))))
}

/// Interprets a JSON value as a string.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if the value is not a string.
pub fn string<'a>(value: &'a Value, context: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| Error::malformed(format!("{context}: expected a string, got {}", kind(value))))
}

/// Extracts a string field from a JSON object.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if the field is absent or not a
/// string.
pub fn string_field<'a>(map: &'a Map<String, Value>, name: &str, context: &str) -> Result<&'a str> {
    string(field(map, name, context)?, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Map<String, Value> {
        let Value::Object(map) = json!({
            "slug": "acme",
            "projects": ["backend"],
            "organization": {"slug": "acme"},
            "count": 3,
        }) else {
            unreachable!()
        };
        map
    }

    #[test]
    fn field_present() {
        let map = sample();
        assert_eq!(field(&map, "slug", "org").unwrap(), &json!("acme"));
    }

    #[test]
    fn field_missing_names_context_and_field() {
        let map = sample();
        let err = field(&map, "dsn", "client key").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed API response: client key: missing field \"dsn\""
        );
    }

    #[test]
    fn string_field_happy_path() {
        let map = sample();
        assert_eq!(string_field(&map, "slug", "org").unwrap(), "acme");
    }

    #[test]
    fn string_field_wrong_type() {
        let map = sample();
        let err = string_field(&map, "count", "org").unwrap_err();
        assert!(err.to_string().contains("expected a string, got a number"));
    }

    #[test]
    fn object_wrong_type() {
        let err = object(&json!([1, 2]), "event").unwrap_err();
        assert!(err.to_string().contains("expected an object, got an array"));
    }

    #[test]
    fn array_happy_path() {
        let map = sample();
        let projects = array(field(&map, "projects", "org").unwrap(), "org.projects").unwrap();
        assert_eq!(projects.len(), 1);
    }

    #[test]
    fn null_is_reported_as_null() {
        let err = string(&Value::Null, "user.email").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed API response: user.email: expected a string, got null"
        );
    }
}
