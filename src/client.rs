//! Hue bridge REST client.

use std::time::Duration;

use log::{debug, trace};
use reqwest::header::CONTENT_TYPE;
use serde_json::{Map, Value, json};
use url::Url;

use crate::config::ConfigStore;
use crate::discovery::{BridgeDescriptor, DISCOVERY_URL};
use crate::errors::Error;
use crate::state::StateBody;
use crate::types::Resource;
use crate::validate::{Expect, validate};

type Result<T> = std::result::Result<T, Error>;

/// A bridge record (light, group or scene) or a whole collection keyed by id.
pub type Record = Map<String, Value>;

/// Immutable client configuration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use hue_scene_rs::ClientSettings;
///
/// let settings = ClientSettings::default()
///     .with_device_type("living-room#kiosk")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(settings.device_type(), "living-room#kiosk");
/// assert_eq!(settings.discovery_url().as_str(), "https://discovery.meethue.com/");
/// ```
#[derive(Debug, Clone)]
pub struct ClientSettings {
    discovery_url: Url,
    device_type: String,
    scheme: String,
    timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            discovery_url: Url::parse(DISCOVERY_URL).expect("valid discovery URL"),
            device_type: Self::DEFAULT_DEVICE_TYPE.to_string(),
            scheme: "http".to_string(),
            timeout: None,
        }
    }
}

impl ClientSettings {
    /// Device type sent when creating a user, `<application>#<device>`.
    pub const DEFAULT_DEVICE_TYPE: &'static str = "hue-scene-mgr#rust";

    pub fn with_discovery_url(mut self, url: Url) -> Self {
        self.discovery_url = url;
        self
    }

    pub fn with_device_type(mut self, device_type: &str) -> Self {
        self.device_type = device_type.to_string();
        self
    }

    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    /// Apply a per-request timeout. Without one the transport defaults apply.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn discovery_url(&self) -> &Url {
        &self.discovery_url
    }

    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Client for a single Hue bridge.
///
/// Bridge address and username are read from the [`ConfigStore`] before
/// every request, so changes made through [`HueClient::select_bridge`] or
/// [`HueClient::register_user`] apply immediately. Each operation is a
/// single request; nothing is retried or cached.
///
/// # Example
///
/// ```
/// use hue_scene_rs::{BackendKind, ClientSettings, ConfigStore, HueClient};
///
/// let store = ConfigStore::open(BackendKind::Storage);
/// store.set_bridge_ip("192.168.1.2").unwrap();
/// let client = HueClient::new(ClientSettings::default(), store).unwrap();
/// assert_eq!(client.host().unwrap().as_str(), "http://192.168.1.2/");
/// ```
#[derive(Debug)]
pub struct HueClient {
    http: reqwest::Client,
    settings: ClientSettings,
    store: ConfigStore,
}

impl HueClient {
    /// Create a client with its own HTTP connection pool.
    pub fn new(settings: ClientSettings, store: ConfigStore) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self::with_client(http, settings, store))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, settings: ClientSettings, store: ConfigStore) -> Self {
        HueClient {
            http,
            settings,
            store,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Base URL of the configured bridge, e.g. `http://192.168.1.2/`.
    pub fn host(&self) -> Result<Url> {
        let ip = self
            .store
            .bridge_ip()?
            .ok_or(Error::MissingConfig("bridge ip"))?;
        Ok(Url::parse(&format!("{}://{}", self.settings.scheme, ip))?)
    }

    /// List bridges on the caller's network via the cloud discovery service.
    pub async fn discover_bridges(&self) -> Result<Vec<BridgeDescriptor>> {
        let body = self
            .get(self.settings.discovery_url.clone(), Expect::array())
            .await?;
        serde_json::from_value(body).map_err(Error::JsonLoad)
    }

    /// Store the bridge's address as the one to talk to.
    pub fn select_bridge(&self, bridge: &BridgeDescriptor) -> Result<()> {
        debug!("selecting bridge {} at {}", bridge.id, bridge.host());
        self.store.set_bridge_ip(&bridge.host())
    }

    /// Create a new whitelisted user on the bridge and return its name.
    ///
    /// The bridge only accepts this within about 30 seconds of its link
    /// button being pressed; otherwise it answers with error 101.
    pub async fn create_user(&self, device_type: Option<&str>) -> Result<String> {
        let url = self.join(self.host()?, &["api"])?;
        let device_type = device_type.unwrap_or(&self.settings.device_type);

        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .json(&json!({ "devicetype": device_type }))
            .send()
            .await?;
        let body = Self::decode(resp, Expect::array()).await?;

        body.as_array()
            .into_iter()
            .flatten()
            .find_map(|item| item.pointer("/success/username")?.as_str())
            .map(String::from)
            .ok_or(Error::MissingUsername)
    }

    /// Create a user and store it as the username for later requests.
    pub async fn register_user(&self, device_type: Option<&str>) -> Result<String> {
        let username = self.create_user(device_type).await?;
        self.store.set_username(&username)?;
        Ok(username)
    }

    /// Fetch a whole collection, or a single record when `id` is given.
    ///
    /// Both forms are JSON objects: the collection maps id to record.
    pub async fn get_resource(&self, resource: Resource, id: Option<&str>) -> Result<Record> {
        let url = match id {
            Some(id) => self.api_url(&[resource.as_ref(), id])?,
            None => self.api_url(&[resource.as_ref()])?,
        };
        let body = self.get(url, Expect::object()).await?;
        match body {
            Value::Object(record) => Ok(record),
            other => Err(Error::shape("object", &other)),
        }
    }

    pub async fn get_lights(&self, id: Option<&str>) -> Result<Record> {
        self.get_resource(Resource::Lights, id).await
    }

    pub async fn get_groups(&self, id: Option<&str>) -> Result<Record> {
        self.get_resource(Resource::Groups, id).await
    }

    pub async fn get_scenes(&self, id: Option<&str>) -> Result<Record> {
        self.get_resource(Resource::Scenes, id).await
    }

    /// The state a scene stores for one light.
    ///
    /// Returns `Ok(None)` if the scene has no entry for `light_id`.
    pub async fn get_light_state(&self, scene_id: &str, light_id: &str) -> Result<Option<Value>> {
        let scene = self.get_scenes(Some(scene_id)).await?;
        Ok(scene
            .get("lightstates")
            .and_then(|states| states.get(light_id))
            .cloned())
    }

    /// Overwrite the state a scene stores for one light.
    pub async fn set_light_state(
        &self,
        scene_id: &str,
        light_id: &str,
        state: impl Into<StateBody>,
    ) -> Result<Value> {
        let url = self.api_url(&[
            Resource::Scenes.as_ref(),
            scene_id,
            "lightstates",
            light_id,
        ])?;
        self.put(url, state.into()).await
    }

    /// Change the live state of a light.
    pub async fn set_light(&self, light_id: &str, state: impl Into<StateBody>) -> Result<Value> {
        let url = self.api_url(&[Resource::Lights.as_ref(), light_id, "state"])?;
        self.put(url, state.into()).await
    }

    /// Apply a stored scene to the lights of a group.
    pub async fn recall_scene(&self, group_id: &str, scene_id: &str) -> Result<Value> {
        let url = self.api_url(&[Resource::Groups.as_ref(), group_id, "action"])?;
        self.put(url, StateBody::Json(json!({ "scene": scene_id })))
            .await
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url> {
        let username = self
            .store
            .username()?
            .ok_or(Error::MissingConfig("username"))?;
        let mut path = vec!["api", username.as_str()];
        path.extend_from_slice(segments);
        self.join(self.host()?, &path)
    }

    // Each segment is percent-encoded on its own, so ids cannot add path
    // levels, queries or fragments.
    fn join(&self, mut host: Url, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(Error::InvalidId(bad.to_string()));
        }
        host.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(host)
    }

    async fn get(&self, url: Url, expect: Expect) -> Result<Value> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        Self::decode(resp, expect).await
    }

    async fn put(&self, url: Url, body: StateBody) -> Result<Value> {
        let text = body.into_text()?;
        debug!("PUT {} {}", url, text);
        let resp = self
            .http
            .put(url)
            .header(CONTENT_TYPE, "application/json")
            .body(text)
            .send()
            .await?;
        Self::decode(resp, Expect::any()).await
    }

    async fn decode(resp: reqwest::Response, expect: Expect) -> Result<Value> {
        let status = resp.status();
        let text = resp.text().await?;
        trace!("response {}: {}", status, text);

        if status.is_success() {
            let body = serde_json::from_str::<Value>(&text).map_err(Error::JsonLoad)?;
            return validate(body, expect);
        }

        // Bridge error envelopes are reported in place of the failure status.
        if let Ok(body) = serde_json::from_str::<Value>(&text) {
            validate(body, Expect::any())?;
        }
        Err(Error::Status {
            status: status.as_u16(),
            body: text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendKind;

    fn client_with(ip: Option<&str>, username: Option<&str>) -> HueClient {
        let store = ConfigStore::open(BackendKind::Storage);
        if let Some(ip) = ip {
            store.set_bridge_ip(ip).unwrap();
        }
        if let Some(username) = username {
            store.set_username(username).unwrap();
        }
        HueClient::new(ClientSettings::default(), store).unwrap()
    }

    #[test]
    fn test_api_url_layout() {
        let client = client_with(Some("10.0.0.2"), Some("abc"));
        let url = client
            .api_url(&["scenes", "s1", "lightstates", "2"])
            .unwrap();
        assert_eq!(url.as_str(), "http://10.0.0.2/api/abc/scenes/s1/lightstates/2");
    }

    #[test]
    fn test_missing_ip_is_reported() {
        let client = client_with(None, Some("abc"));
        assert_eq!(
            client.api_url(&["lights"]).unwrap_err(),
            Error::MissingConfig("bridge ip")
        );
    }

    #[test]
    fn test_missing_username_is_reported() {
        let client = client_with(Some("10.0.0.2"), None);
        assert_eq!(
            client.api_url(&["lights"]).unwrap_err(),
            Error::MissingConfig("username")
        );
        assert!(client.host().is_ok());
    }

    #[test]
    fn test_scheme_is_configurable() {
        let store = ConfigStore::open(BackendKind::Storage);
        store.set_bridge_ip("bridge.local:8443").unwrap();
        let settings = ClientSettings::default().with_scheme("https");
        let client = HueClient::new(settings, store).unwrap();
        assert_eq!(client.host().unwrap().as_str(), "https://bridge.local:8443/");
        assert_eq!(client.settings().scheme(), "https");
    }

    #[test]
    fn test_ids_are_single_encoded_segments() {
        let client = client_with(Some("10.0.0.2"), Some("abc"));
        let url = client
            .api_url(&["scenes", "a/b?c#d", "lightstates", "2"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://10.0.0.2/api/abc/scenes/a%2Fb%3Fc%23d/lightstates/2"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_dot_segments_are_rejected() {
        let client = client_with(Some("10.0.0.2"), Some("abc"));
        for id in ["", ".", ".."] {
            assert_eq!(
                client.api_url(&["lights", id]).unwrap_err(),
                Error::InvalidId(id.to_string())
            );
        }
    }
}
