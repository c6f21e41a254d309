//! # hue_scene_rs
//!
//! An async Rust client for the Philips Hue bridge local REST API.
//!
//! This crate finds bridges through the Hue discovery service, pairs with a
//! bridge through its link button, reads lights, groups and scenes, and
//! edits the light states stored in scenes. The bridge address and username
//! are persisted in a small key-value config.
//!
//! ## Quick Start
//!
//! ```ignore
//! use hue_scene_rs::{BackendKind, ClientSettings, ConfigStore, HueClient, LightState, StateBody};
//!
//! async fn dim_scene() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ConfigStore::open(BackendKind::default());
//!     let client = HueClient::new(ClientSettings::default(), store)?;
//!
//!     // First run: pick a bridge and pair (press the link button first)
//!     if client.store().bridge_ip()?.is_none() {
//!         let bridges = client.discover_bridges().await?;
//!         client.select_bridge(&bridges[0])?;
//!         client.register_user(None).await?;
//!     }
//!
//!     let mut state = LightState::new();
//!     state.on(true).brightness(&hue_scene_rs::Brightness::from_percent(20));
//!     client.set_light_state("scene-id", "1", StateBody::try_from(&state)?).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Discovery**: Find bridges with [`HueClient::discover_bridges`]
//! - **Pairing**: Create a bridge user with [`HueClient::register_user`]
//! - **Lights, Groups, Scenes**: Read records with [`HueClient::get_lights`],
//!   [`HueClient::get_groups`] and [`HueClient::get_scenes`]
//! - **Scene editing**: Read and write per-light scene state with
//!   [`HueClient::get_light_state`] and [`HueClient::set_light_state`]
//! - **Filtering**: Select records by field with [`filter::filter_entries`]
//!   and [`filter::distinct_values`]
//! - **Config**: Persist bridge settings to a file or an in-process storage
//!   through [`ConfigStore`]
//!
//! ## Errors
//!
//! The bridge reports failures as an array of `{"error": {...}}` objects.
//! Every response passes through [`validate::validate`], which turns such
//! envelopes into [`Error::Bridge`] with one description per line.
//!
//! ## Logging
//!
//! Requests are logged through the [`log`] facade at `debug` level and raw
//! responses at `trace` level. Install any `log` compatible logger to see them.

mod client;
pub mod codec;
mod config;
mod discovery;
mod errors;
pub mod filter;
mod state;
mod types;
pub mod validate;

// Re-export public API
pub use client::{ClientSettings, HueClient, Record};
pub use config::{
    BackendKind, BridgeConfig, CONFIG_FILE_NAME, ConfigBackend, ConfigStore, FileBackend,
    HUE_BRIDGE_IP_KEY, StorageBackend, USERNAME_KEY,
};
pub use discovery::{BridgeDescriptor, DISCOVERY_URL};
pub use errors::{BridgeErrorEntry, Error};
pub use state::{LightState, StateBody};
pub use types::{Alert, Brightness, ColorTemperature, Effect, HueSaturation, Resource};
