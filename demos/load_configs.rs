// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading example for the configuration crate.
//!
//! This example demonstrates:
//! - Serving the four category documents from a directory
//! - Subscribing to the published events
//! - Loading every category concurrently
//! - Reading values by dot path, with and without defaults
//! - Applying an editor update and watching a rejected one fail
//!
//! To run this example:
//! ```bash
//! cargo run --example load_configs
//! ```

use serde_json::json;
use vib34d_config::prelude::*;

const DOCUMENTS: [(&str, &str); 4] = [
    (
        "layout-content.json",
        r#"{"layout": {"title": "Hypercube Gallery"}, "components": {"header": {}}, "cards": [{"id": "intro"}]}"#,
    ),
    (
        "visuals.json",
        r#"{"themes": ["neon"], "geometries": ["tesseract"], "parameters": {"rotationSpeed": 0.4}}"#,
    ),
    (
        "behavior.json",
        r#"{"interactionBlueprints": {"scroll": {"morph": true}}}"#,
    ),
    (
        "state-map.json",
        r#"{"states": {"home": {}, "gallery": {}}, "initialState": "home"}"#,
    ),
];

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== Configuration Crate: Loading Documents ===\n");

    let dir = tempfile::tempdir()?;
    for (name, body) in DOCUMENTS {
        std::fs::write(dir.path().join(name), body)?;
    }

    let system = JsonConfigSystem::builder()
        .with_directory(dir.path())?
        .build()?;

    // Print every event as it is delivered
    let mut names = vec![EventName::AllLoaded];
    for category in ConfigCategory::ALL {
        names.push(EventName::Loaded(category));
        names.push(EventName::Updated(category));
    }
    for name in names {
        system.subscribe(name, |event| {
            println!("  event: {}", event.name);
            Ok(())
        });
    }

    println!("--- Example 1: Loading all categories ---");
    let snapshot = system.load_all().await?;
    println!("✓ All categories loaded: {}\n", snapshot.is_complete());

    println!("--- Example 2: Reading values ---");
    let title = system.get_value(ConfigCategory::Layout, "layout.title");
    println!("layout.title = {:?}", title);

    let speed: Option<f64> =
        system.get_value_as(ConfigCategory::Visuals, "parameters.rotationSpeed");
    println!("parameters.rotationSpeed = {:?}", speed);

    let zoom = system.get_value_or(ConfigCategory::Visuals, "parameters.zoom", json!(1.0));
    println!("parameters.zoom (default) = {}\n", zoom);

    println!("--- Example 3: Editor updates ---");
    system.update(
        ConfigCategory::StateMap,
        json!({"states": {"home": {}, "gallery": {}}, "initialState": "gallery"}),
    )?;
    println!(
        "initialState is now {}",
        system.get_value_or(ConfigCategory::StateMap, "initialState", json!(null))
    );

    match system.update(ConfigCategory::StateMap, json!({"states": {}})) {
        Ok(_) => println!("✗ Update unexpectedly accepted"),
        Err(e) => println!("✓ Rejected update: {}", e),
    }

    Ok(())
}
