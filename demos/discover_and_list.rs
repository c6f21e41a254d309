//! Discover a Hue bridge and list the scenes stored on it.
//!
//! This example demonstrates:
//! - Discovery through the Hue cloud service
//! - Pairing when no username is stored yet
//! - Listing scenes with their light states
//!
//! Run with: cargo run --example discover_and_list

use hue_scene_rs::{BackendKind, ClientSettings, ConfigStore, HueClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = ConfigStore::open(BackendKind::default());
    let client = HueClient::new(ClientSettings::default(), store)?;

    if client.store().bridge_ip()?.is_none() {
        println!("Discovering Hue bridges...");
        let bridges = client.discover_bridges().await?;
        let Some(bridge) = bridges.first() else {
            println!("No bridges found on the network.");
            return Ok(());
        };
        client.select_bridge(bridge)?;
        println!("Found bridge {} at {}", bridge.id, bridge.host());
    }

    if client.store().username()?.is_none() {
        println!("Press the link button on the bridge, then hit enter.");
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        let username = client.register_user(None).await?;
        println!("Paired as {}", username);
    }

    let scenes = client.get_scenes(None).await?;
    println!("Found {} scene(s):", scenes.len());
    for (id, scene) in &scenes {
        let name = scene.get("name").and_then(|n| n.as_str()).unwrap_or("-");
        println!("  {:16}  {}", id, name);

        let detail = client.get_scenes(Some(id.as_str())).await?;
        if let Some(states) = detail.get("lightstates").and_then(|s| s.as_object()) {
            for (light, state) in states {
                println!("      light {:4} {}", light, state);
            }
        }
    }

    Ok(())
}
