//! Translation document flattening.

use std::collections::HashMap;

use serde_json::Value;

/// Separator between path segments of a flattened key.
pub const KEY_SEPARATOR: &str = ".";

/// Flattened translation entries (e.g., "common.hello" -> "Hello").
pub type Entries = HashMap<String, String>;

/// Flatten a nested JSON document into a dot-separated key map.
///
/// Object members extend the prefix by `.key`, array elements by `.index`.
/// `null` leaves are omitted; other scalars are stored in their textual form.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use app_shell::input::translation::flatten;
///
/// let json = json!({
///     "a": {
///         "b": "x",
///         "c": [10, 20]
///     }
/// });
///
/// let flattened = flatten("", &json);
/// assert_eq!(flattened.get("a.b"), Some(&"x".to_string()));
/// assert_eq!(flattened.get("a.c.0"), Some(&"10".to_string()));
/// assert_eq!(flattened.get("a.c.1"), Some(&"20".to_string()));
/// ```
#[must_use]
pub fn flatten(prefix: &str, node: &Value) -> Entries {
    let mut result = HashMap::new();
    flatten_value(prefix, node, &mut result);
    result
}

/// Join a child segment onto a prefix; the empty prefix yields the bare segment.
#[must_use]
pub fn join_key(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}{KEY_SEPARATOR}{segment}")
    }
}

/// Recursive worker for [`flatten`].
fn flatten_value(prefix: &str, node: &Value, result: &mut Entries) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_value(&join_key(prefix, key), value, result);
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                flatten_value(&join_key(prefix, &index.to_string()), value, result);
            }
        }
        Value::Null => {}
        Value::String(s) => {
            result.insert(prefix.to_string(), s.clone());
        }
        Value::Bool(_) | Value::Number(_) => {
            result.insert(prefix.to_string(), node.to_string());
        }
    }
}

/// Parse a translation document, returning `None` for malformed input.
#[must_use]
pub fn parse_document(text: &str, origin: &str) -> Option<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Failed to parse translation document {}: {}", origin, e);
            None
        }
    }
}

/// Flatten an optional document; a missing document yields no entries.
#[must_use]
pub fn flatten_document(document: Option<&Value>) -> Entries {
    document.map(|doc| flatten("", doc)).unwrap_or_default()
}
