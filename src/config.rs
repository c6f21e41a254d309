//! Persisted bridge configuration.
//!
//! Values are stored under flat string keys. Two backends are available and
//! picked explicitly through [`BackendKind`]:
//!
//! - [`FileBackend`] keeps the whole mapping in one pretty-printed JSON file.
//! - [`StorageBackend`] keeps one JSON-serialized string per key, the way a
//!   browser's local storage does.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec;
use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Default name of the config file.
pub const CONFIG_FILE_NAME: &str = ".hue-scene-mgr.json";
/// Key holding the bridge IP address.
pub const HUE_BRIDGE_IP_KEY: &str = "hue-bridge-ip";
/// Key holding the whitelisted bridge username.
pub const USERNAME_KEY: &str = "username";

/// A key-value persistence target for config values.
pub trait ConfigBackend: Send + Sync {
    /// Read the value stored under `key`.
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`.
    fn save(&self, key: &str, value: Value) -> Result<()>;
}

/// Which backend a [`ConfigStore`] should use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    /// A JSON file at the given path.
    File(PathBuf),
    /// An in-process key-value storage.
    Storage,
}

impl Default for BackendKind {
    fn default() -> Self {
        BackendKind::File(PathBuf::from(CONFIG_FILE_NAME))
    }
}

/// File-backed config.
///
/// A missing or unparseable file reads as an empty mapping, and the next
/// save overwrites it. There is no locking: concurrent writers can lose
/// updates.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBackend { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(Error::config_io("read", &self.path, e)),
        };

        match codec::deserialize::<Value>(&text) {
            Some(Value::Object(map)) => Ok(map),
            Some(_) | None => {
                warn!(
                    "config file {:?} is not a JSON object; treating it as empty",
                    self.path
                );
                Ok(Map::new())
            }
        }
    }
}

impl ConfigBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: Value) -> Result<()> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), value);
        let text = codec::serialize(&map)?;
        debug!("writing config key {key:?} to {:?}", self.path);
        fs::write(&self.path, text).map_err(|e| Error::config_io("write", &self.path, e))
    }
}

/// Key-value storage backend.
///
/// Each entry holds the JSON text of its value. Clones share the same
/// underlying storage.
#[derive(Debug, Clone, Default)]
pub struct StorageBackend {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl StorageBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw stored text for `key`.
    pub fn get_item(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Store raw text under `key`.
    pub fn set_item(&self, key: &str, text: String) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), text);
    }
}

impl ConfigBackend for StorageBackend {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self
            .get_item(key)
            .and_then(|text| codec::deserialize(&text)))
    }

    fn save(&self, key: &str, value: Value) -> Result<()> {
        let text = serde_json::to_string(&value).map_err(Error::JsonDump)?;
        self.set_item(key, text);
        Ok(())
    }
}

/// Bridge address and credentials as stored in the config.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(rename = "hue-bridge-ip")]
    pub hue_bridge_ip: Option<String>,
    pub username: Option<String>,
}

/// Typed access to the persisted config.
///
/// # Example
///
/// ```
/// use hue_scene_rs::{BackendKind, ConfigStore};
///
/// let store = ConfigStore::open(BackendKind::Storage);
/// assert!(store.username().unwrap().is_none());
///
/// store.set_bridge_ip("192.168.1.2").unwrap();
/// assert_eq!(store.bridge_ip().unwrap().as_deref(), Some("192.168.1.2"));
/// ```
pub struct ConfigStore {
    backend: Box<dyn ConfigBackend>,
}

impl ConfigStore {
    pub fn new(backend: impl ConfigBackend + 'static) -> Self {
        ConfigStore {
            backend: Box::new(backend),
        }
    }

    /// Build a store for the selected backend.
    pub fn open(kind: BackendKind) -> Self {
        match kind {
            BackendKind::File(path) => Self::new(FileBackend::new(path)),
            BackendKind::Storage => Self::new(StorageBackend::new()),
        }
    }

    pub fn load(&self, key: &str) -> Result<Option<Value>> {
        self.backend.load(key)
    }

    pub fn save(&self, key: &str, value: Value) -> Result<()> {
        self.backend.save(key, value)
    }

    pub fn bridge_ip(&self) -> Result<Option<String>> {
        self.load_string(HUE_BRIDGE_IP_KEY)
    }

    pub fn set_bridge_ip(&self, ip: &str) -> Result<()> {
        self.save(HUE_BRIDGE_IP_KEY, Value::from(ip))
    }

    pub fn username(&self) -> Result<Option<String>> {
        self.load_string(USERNAME_KEY)
    }

    pub fn set_username(&self, username: &str) -> Result<()> {
        self.save(USERNAME_KEY, Value::from(username))
    }

    pub fn bridge_config(&self) -> Result<BridgeConfig> {
        Ok(BridgeConfig {
            hue_bridge_ip: self.bridge_ip()?,
            username: self.username()?,
        })
    }

    // Empty strings count as unset.
    fn load_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .load(key)?
            .and_then(|v| v.as_str().map(String::from))
            .filter(|s| !s.is_empty()))
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_round_trip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        FileBackend::new(&path)
            .save("username", json!("abc123"))
            .unwrap();
        FileBackend::new(&path)
            .save("hue-bridge-ip", json!("10.0.0.2"))
            .unwrap();

        let reopened = FileBackend::new(&path);
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(reopened.load("username").unwrap(), Some(json!("abc123")));
        assert_eq!(reopened.load("hue-bridge-ip").unwrap(), Some(json!("10.0.0.2")));
        assert_eq!(reopened.load("missing").unwrap(), None);
    }

    #[test]
    fn test_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        FileBackend::new(&path).save("username", json!("u")).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"username\": \"u\"\n}");
    }

    #[test]
    fn test_save_replaces_without_merging() {
        let backend = StorageBackend::new();
        backend.save("k", json!({"a": 1, "b": 2})).unwrap();
        backend.save("k", json!({"c": 3})).unwrap();
        assert_eq!(backend.load("k").unwrap(), Some(json!({"c": 3})));
    }

    #[test]
    fn test_corrupt_file_reads_empty_and_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, "{ definitely not json").unwrap();

        let backend = FileBackend::new(&path);
        assert_eq!(backend.load("username").unwrap(), None);

        backend.save("username", json!("fresh")).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(codec::deserialize::<Value>(&text), Some(json!({"username": "fresh"})));
    }

    #[test]
    fn test_non_object_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert_eq!(FileBackend::new(&path).load("0").unwrap(), None);
    }

    #[test]
    fn test_storage_entries_are_json_text() {
        let backend = StorageBackend::new();
        backend.save("username", json!("abc")).unwrap();
        assert_eq!(backend.get_item("username").as_deref(), Some("\"abc\""));

        backend.set_item("broken", "{oops".into());
        assert_eq!(backend.load("broken").unwrap(), None);
    }

    #[test]
    fn test_storage_clones_share_entries() {
        let backend = StorageBackend::new();
        let store = ConfigStore::new(backend.clone());
        store.set_username("shared").unwrap();
        assert_eq!(backend.load("username").unwrap(), Some(json!("shared")));
    }

    #[test]
    fn test_bridge_config_treats_empty_as_unset() {
        let store = ConfigStore::open(BackendKind::Storage);
        store.set_bridge_ip("10.0.0.2").unwrap();
        store.set_username("").unwrap();

        assert_eq!(
            store.bridge_config().unwrap(),
            BridgeConfig {
                hue_bridge_ip: Some("10.0.0.2".into()),
                username: None,
            }
        );
    }

    #[test]
    fn test_default_backend_is_file() {
        assert_eq!(
            BackendKind::default(),
            BackendKind::File(PathBuf::from(".hue-scene-mgr.json"))
        );
    }
}
