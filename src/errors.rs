use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// All error types that can occur when talking to a Hue bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to serialize data to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// Failed to deserialize JSON data.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// The HTTP request to the bridge or the discovery service failed.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status and a body that is not JSON.
    #[error("http status {status}: {body}")]
    Status { status: u16, body: String },

    /// A bridge or discovery URL could not be built.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The response body did not have the expected JSON shape.
    #[error("unexpected response shape: expected {expected}, found {found}")]
    Shape {
        expected: &'static str,
        found: &'static str,
    },

    /// The bridge answered with one or more error entries.
    #[error("{}", join_descriptions(.0))]
    Bridge(Vec<BridgeErrorEntry>),

    /// A required config value (bridge IP or username) has not been set.
    #[error("{0} is not configured")]
    MissingConfig(&'static str),

    /// User creation succeeded but the bridge did not return a username.
    #[error("bridge response did not contain a username")]
    MissingUsername,

    /// An id cannot be used as a URL path segment.
    #[error("invalid resource id {0:?}")]
    InvalidId(String),

    /// Reading or writing the config file failed.
    #[error("config file {action} error for {path:?}: {err:?}")]
    ConfigIo {
        action: String,
        path: PathBuf,
        err: std::io::Error,
    },
}

impl Error {
    /// Create a new config io error
    pub fn config_io(action: &str, path: &Path, err: std::io::Error) -> Self {
        Error::ConfigIo {
            action: action.to_string(),
            path: path.to_path_buf(),
            err,
        }
    }

    /// Create a new shape error from the expected shape and the offending value
    pub fn shape(expected: &'static str, found: &serde_json::Value) -> Self {
        Error::Shape {
            expected,
            found: json_kind(found),
        }
    }

    /// The bridge-reported errors, if this is a [`Error::Bridge`].
    pub fn bridge_errors(&self) -> Option<&[BridgeErrorEntry]> {
        match self {
            Error::Bridge(entries) => Some(entries),
            _ => None,
        }
    }
}

/// A single `{"error": {...}}` entry of the bridge's error envelope.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeErrorEntry {
    /// Numeric error type assigned by the bridge (e.g. 101 for "link button not pressed").
    #[serde(rename = "type")]
    pub error_type: Option<u32>,
    /// Resource address the error refers to.
    pub address: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl fmt::Display for BridgeErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

fn join_descriptions(entries: &[BridgeErrorEntry]) -> String {
    entries
        .iter()
        .map(|e| e.description.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_error_joins_descriptions() {
        let err = Error::Bridge(vec![
            BridgeErrorEntry {
                description: "link button not pressed".into(),
                ..Default::default()
            },
            BridgeErrorEntry {
                error_type: Some(3),
                address: Some("/lights/9".into()),
                description: "resource, /lights/9, not available".into(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "link button not pressed\nresource, /lights/9, not available"
        );
        assert_eq!(err.bridge_errors().map(|e| e.len()), Some(2));
    }

    #[test]
    fn test_shape_error_names_kinds() {
        let err = Error::shape("array", &serde_json::json!({"a": 1}));
        assert_eq!(
            err,
            Error::Shape {
                expected: "array",
                found: "object"
            }
        );
    }
}
