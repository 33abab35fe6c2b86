// Shared helpers for reading provider error bodies.

use serde_json::Value;

/// Walk a nested JSON value using an array of string keys.
/// Returns `Some(&Value)` at the end of the path, or `None` if any key is missing.
pub fn extract_json_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.get(*key)?;
    }
    Some(current)
}

/// Extract the provider's error message from a response body.
///
/// OpenRouter reports errors as `{"error": {"code": 401, "message": "..."}}`.
/// Returns `None` when the body is not JSON or carries no message.
pub fn parse_provider_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    extract_json_path(&value, &["error", "message"])
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
