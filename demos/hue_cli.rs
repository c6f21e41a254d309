//! CLI application for managing Hue scenes.
//!
//! This example demonstrates a command-line interface over the library:
//! discovery, pairing, listing and editing the light states of a scene.
//!
//! Run with: cargo run --example hue_cli -- --help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use hue_scene_rs::{
    BackendKind, Brightness, ClientSettings, ColorTemperature, ConfigStore, HueClient,
    LightState, Record, StateBody,
    filter::{distinct_values, filter_entries},
};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "hue-cli")]
#[command(about = "Manage Philips Hue scenes from the command line", long_about = None)]
struct Cli {
    /// Config file holding the bridge IP and username
    #[arg(short, long, global = true, default_value = hue_scene_rs::CONFIG_FILE_NAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Lights,
    Groups,
    Scenes,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover bridges and store the first one found
    Discover,

    /// Use a bridge at a known address
    Bridge {
        /// IP address (optionally with port) of the bridge
        ip: String,
    },

    /// Pair with the bridge (press its link button first)
    Pair {
        /// Device type reported to the bridge
        #[arg(short, long)]
        device_type: Option<String>,
    },

    /// List lights, groups or scenes
    List {
        #[arg(value_enum)]
        kind: Kind,

        /// Only show entries where FIELD equals VALUE (repeatable)
        #[arg(short, long, value_parser = parse_filter)]
        filter: Vec<(String, String)>,

        /// Only show the first entry for each distinct value of this field
        #[arg(short, long)]
        distinct: Option<String>,
    },

    /// Show the state a scene stores for a light
    Get { scene: String, light: String },

    /// Change the state a scene stores for a light
    Set {
        scene: String,
        light: String,

        /// Turn the light on or off
        #[arg(long)]
        on: Option<bool>,

        /// Brightness in percent (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        brightness: Option<u8>,

        /// Color temperature in Kelvin
        #[arg(long)]
        kelvin: Option<u32>,
    },

    /// Recall a scene on a group
    Recall { group: String, scene: String },
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected FIELD=VALUE, got {s:?}"))
}

fn print_entries(records: &Record, filters: &[(String, String)], distinct: Option<&str>) {
    let filters: Map<String, Value> = filters
        .iter()
        .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
        .collect();

    let mut entries = filter_entries(records, &filters);
    if let Some(key) = distinct {
        let kept: Map<String, Value> = entries
            .into_iter()
            .filter_map(|e| Some((e.id()?.to_string(), Value::Object(e.into_map()))))
            .collect();
        entries = distinct_values(&kept, key);
    }

    for entry in entries {
        let name = entry.get("name").and_then(Value::as_str).unwrap_or("-");
        println!("  {:20}  {}", entry.id().unwrap_or("?"), name);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let store = ConfigStore::open(BackendKind::File(cli.config));
    let client = HueClient::new(ClientSettings::default(), store)?;

    match cli.command {
        Commands::Discover => {
            println!("Discovering Hue bridges...");
            let bridges = client.discover_bridges().await?;
            if bridges.is_empty() {
                println!("No bridges found.");
                return Ok(());
            }
            for bridge in &bridges {
                println!("  ID: {}  IP: {}", bridge.id, bridge.host());
            }
            client.select_bridge(&bridges[0])?;
            println!("Using bridge {}", bridges[0].host());
        }

        Commands::Bridge { ip } => {
            client.store().set_bridge_ip(&ip)?;
            println!("Using bridge {}", ip);
        }

        Commands::Pair { device_type } => {
            let username = client.register_user(device_type.as_deref()).await?;
            println!("Paired as {}", username);
        }

        Commands::List {
            kind,
            filter,
            distinct,
        } => {
            let records = match kind {
                Kind::Lights => client.get_lights(None).await?,
                Kind::Groups => client.get_groups(None).await?,
                Kind::Scenes => client.get_scenes(None).await?,
            };
            print_entries(&records, &filter, distinct.as_deref());
        }

        Commands::Get { scene, light } => match client.get_light_state(&scene, &light).await? {
            Some(state) => println!("{}", hue_scene_rs::codec::serialize(&state)?),
            None => eprintln!("Scene {} has no state for light {}", scene, light),
        },

        Commands::Set {
            scene,
            light,
            on,
            brightness,
            kelvin,
        } => {
            let mut state = LightState::new();
            if let Some(on) = on {
                state.on(on);
            }
            if let Some(percent) = brightness {
                state.brightness(&Brightness::from_percent(percent));
            }
            if let Some(kelvin) = kelvin {
                state.color_temperature(&ColorTemperature::from_kelvin(kelvin));
            }
            if !state.is_valid() {
                return Err("nothing to set; pass --on, --brightness or --kelvin".into());
            }

            client
                .set_light_state(&scene, &light, StateBody::try_from(&state)?)
                .await?;
            println!("Updated light {} in scene {}", light, scene);
        }

        Commands::Recall { group, scene } => {
            client.recall_scene(&group, &scene).await?;
            println!("Recalled scene {} on group {}", scene, group);
        }
    }

    Ok(())
}
