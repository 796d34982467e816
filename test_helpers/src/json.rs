//! JSON parsing for step captures.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::text::unquote;

/// Parses a captured JSON document, removing one layer of outer quotes first.
///
/// Feature files quote JSON arguments with single quotes so the embedded
/// double quotes survive; both forms are accepted.
///
/// # Errors
///
/// Returns an error naming the offending text when it is not valid JSON.
///
/// # Examples
///
/// ```
/// use shapecast_test_helpers::json::parse_json;
///
/// let value = parse_json(r#"'{"id": 1}'"#).expect("valid json");
/// assert_eq!(value, serde_json::json!({"id": 1}));
/// ```
pub fn parse_json(text: &str) -> Result<Value> {
    let body = unquote(text);
    serde_json::from_str(body).with_context(|| format!("invalid JSON in step text: {body}"))
}

/// Renders `value` on one line for assertion messages.
#[must_use]
pub fn compact(value: &Value) -> String {
    value.to_string()
}
