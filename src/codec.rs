//! JSON text helpers shared by the config store and the client.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Serialize a value as pretty-printed JSON with a two space indent.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let text = hue_scene_rs::codec::serialize(&json!({"username": "abc"})).unwrap();
/// assert_eq!(text, "{\n  \"username\": \"abc\"\n}");
/// ```
pub fn serialize<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(Error::JsonDump)
}

/// Parse JSON text, returning `None` on any parse error.
pub fn deserialize<T: DeserializeOwned>(text: &str) -> Option<T> {
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(e) => {
            log::trace!("discarding unparseable json: {e}");
            None
        }
    }
}

/// Parse JSON text, returning `fallback` on any parse error.
///
/// # Examples
///
/// ```
/// use serde_json::{Value, json};
/// use hue_scene_rs::codec::deserialize_or;
///
/// assert_eq!(deserialize_or("{\"on\":true}", Value::Null), json!({"on": true}));
/// assert_eq!(deserialize_or("{not json", json!({})), json!({}));
/// ```
pub fn deserialize_or<T: DeserializeOwned>(text: &str, fallback: T) -> T {
    deserialize(text).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    #[test]
    fn test_serialize_nested_indent() {
        let text = serialize(&json!({"a": {"b": [1, 2]}})).unwrap();
        assert_eq!(text, "{\n  \"a\": {\n    \"b\": [\n      1,\n      2\n    ]\n  }\n}");
    }

    #[test]
    fn test_deserialize_never_fails() {
        for text in ["", "{", "[1,", "undefined", "{'a': 1}", "\u{0}"] {
            assert_eq!(deserialize::<Value>(text), None, "input {text:?}");
            assert_eq!(deserialize_or(text, json!("fallback")), json!("fallback"));
        }
    }

    #[test]
    fn test_deserialize_typed_mismatch_uses_fallback() {
        let map: Map<String, Value> = deserialize_or("[1, 2]", Map::new());
        assert!(map.is_empty());
    }
}
