//! Bridge discovery via the Hue cloud discovery endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default cloud discovery endpoint.
pub const DISCOVERY_URL: &str = "https://discovery.meethue.com/";

/// A bridge reported by the discovery service.
///
/// Fields the service adds beyond the known ones are kept in `extra`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeDescriptor {
    /// Bridge identifier (derived from its MAC address)
    pub id: String,
    /// Address of the bridge on the local network
    pub internalipaddress: String,
    pub port: Option<u16>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BridgeDescriptor {
    /// The host to store as the bridge IP, including the port when it is
    /// not the HTTP default.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use hue_scene_rs::BridgeDescriptor;
    ///
    /// let bridge: BridgeDescriptor = serde_json::from_value(json!({
    ///     "id": "001788fffe100491",
    ///     "internalipaddress": "192.168.2.23",
    ///     "port": 443
    /// })).unwrap();
    /// assert_eq!(bridge.host(), "192.168.2.23");
    /// ```
    pub fn host(&self) -> String {
        match self.port {
            Some(port) if port != 80 && port != 443 => {
                format!("{}:{}", self.internalipaddress, port)
            }
            _ => self.internalipaddress.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_are_kept() {
        let bridge: BridgeDescriptor = serde_json::from_value(json!({
            "id": "abc",
            "internalipaddress": "10.0.0.5",
            "macaddress": "00:17:88:10:04:91",
            "name": "Philips hue"
        }))
        .unwrap();

        assert_eq!(bridge.port, None);
        assert_eq!(bridge.extra.get("name"), Some(&json!("Philips hue")));
        assert_eq!(bridge.host(), "10.0.0.5");
    }

    #[test]
    fn test_custom_port_in_host() {
        let bridge: BridgeDescriptor = serde_json::from_value(json!({
            "id": "abc",
            "internalipaddress": "127.0.0.1",
            "port": 8080
        }))
        .unwrap();
        assert_eq!(bridge.host(), "127.0.0.1:8080");
    }
}
