//! Bridge response validation.
//!
//! The bridge reports failures in-band: instead of a payload it returns an
//! array of `{"error": {...}}` objects, usually with HTTP 200. Every response
//! body goes through [`validate`] before it reaches the caller.

use serde_json::Value;

use crate::errors::{BridgeErrorEntry, Error};

type Result<T> = std::result::Result<T, Error>;

/// Shape expectation for a response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expect {
    pub array: bool,
    pub object: bool,
}

impl Expect {
    /// No shape requirement; only the error envelope is checked.
    pub fn any() -> Self {
        Self::default()
    }

    /// The body must be a JSON array.
    pub fn array() -> Self {
        Expect {
            array: true,
            object: false,
        }
    }

    /// The body must be a JSON object (arrays are rejected).
    pub fn object() -> Self {
        Expect {
            array: false,
            object: true,
        }
    }
}

/// Check a decoded body for bridge errors and the expected shape.
///
/// Returns the body unchanged on success. Bridge errors are reported before
/// shape mismatches.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use hue_scene_rs::validate::{Expect, validate};
///
/// let body = json!([{"error": {"type": 101, "address": "", "description": "link button not pressed"}}]);
/// let err = validate(body, Expect::array()).unwrap_err();
/// assert_eq!(err.to_string(), "link button not pressed");
///
/// assert!(validate(json!({"1": {}}), Expect::object()).is_ok());
/// ```
pub fn validate(body: Value, expect: Expect) -> Result<Value> {
    if let Some(errors) = bridge_errors(&body) {
        return Err(Error::Bridge(errors));
    }

    if expect.array && !body.is_array() {
        return Err(Error::shape("array", &body));
    }

    if expect.object && !body.is_object() {
        return Err(Error::shape("object", &body));
    }

    Ok(body)
}

/// Collect the error entries of an error envelope.
///
/// Returns `None` when the body is not an array or no element carries an
/// `error` field. Entries whose `error` is not a well-formed object keep an
/// empty description so the line count still matches the envelope.
fn bridge_errors(body: &Value) -> Option<Vec<BridgeErrorEntry>> {
    let items = body.as_array()?;
    let errors: Vec<BridgeErrorEntry> = items
        .iter()
        .filter_map(|item| item.get("error"))
        .map(|err| serde_json::from_value(err.clone()).unwrap_or_default())
        .collect();

    if errors.is_empty() { None } else { Some(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_descriptions_in_order() {
        let body = json!([
            {"error": {"type": 7, "address": "/lights/1/state/bri", "description": "invalid value, 300, for parameter, bri"}},
            {"success": {"/lights/1/state/on": true}},
            {"error": {"type": 6, "address": "/lights/1/state/foo", "description": "parameter, foo, not available"}}
        ]);

        let err = validate(body, Expect::any()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value, 300, for parameter, bri\nparameter, foo, not available"
        );
        let entries = err.bridge_errors().unwrap();
        assert_eq!(entries[0].error_type, Some(7));
        assert_eq!(entries[1].address.as_deref(), Some("/lights/1/state/foo"));
    }

    #[test]
    fn test_success_envelope_passes() {
        let body = json!([{"success": {"username": "abc"}}]);
        assert_eq!(validate(body.clone(), Expect::array()).unwrap(), body);
    }

    #[test]
    fn test_expect_array_rejects_non_arrays() {
        for body in [json!({}), json!("text"), json!(1), json!(null), json!(true)] {
            let err = validate(body, Expect::array()).unwrap_err();
            assert!(matches!(err, Error::Shape { expected: "array", .. }));
        }
    }

    #[test]
    fn test_expect_object_rejects_arrays() {
        let err = validate(json!([{"id": "1"}]), Expect::object()).unwrap_err();
        assert_eq!(
            err,
            Error::Shape {
                expected: "object",
                found: "array"
            }
        );
        assert!(validate(json!(null), Expect::object()).is_err());
    }

    #[test]
    fn test_error_envelope_wins_over_shape() {
        let body = json!([{"error": {"type": 1, "address": "/", "description": "unauthorized user"}}]);
        let err = validate(body, Expect::object()).unwrap_err();
        assert_eq!(err.to_string(), "unauthorized user");
    }

    #[test]
    fn test_malformed_error_entry_keeps_a_line() {
        let body = json!([{"error": "boom"}, {"error": {"description": "second"}}]);
        let err = validate(body, Expect::any()).unwrap_err();
        assert_eq!(err.to_string(), "\nsecond");
    }

    #[test]
    fn test_any_accepts_scalars() {
        assert_eq!(validate(json!(42), Expect::any()).unwrap(), json!(42));
    }
}
