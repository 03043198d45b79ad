//! Small helpers shared by providers: log truncation and loose JSON field reading.

use serde_json::Value;

/// Maximum number of bytes of a response body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Largest char boundary at or below `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Truncate a response body for logging.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Loose truthiness of a JSON value, the way provider error markers are checked.
///
/// `null`, `false`, `0`, `""` are falsy; objects and arrays are always truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Read a displayable label out of a loosely typed field.
///
/// Strings are returned as-is (empty strings become `None`); objects yield their
/// `name` or `code` member, which is how some providers nest continent data.
pub fn label_from_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("name")
            .or_else(|| map.get("code"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// Best-effort human message out of an error marker (`"reason"`, `"message"`, nested objects).
pub fn error_message(body: &Value) -> Option<String> {
    let marker = body.get("error");
    body.get("reason")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| match marker? {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map
                .get("message")
                .or_else(|| map.get("title"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
}
