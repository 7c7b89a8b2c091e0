//! Small helpers shared by the adapters.

use serde_json::Value;

/// Project a JSON value to a string, accepting numeric identifiers.
///
/// Several providers return numeric user ids (GitHub, GitLab); the `OpenID`
/// schema keeps ids as strings.
pub(crate) fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `response[key]` as an owned string, numbers included.
pub(crate) fn string_field(response: &Value, key: &str) -> Option<String> {
    response.get(key).and_then(stringify)
}
