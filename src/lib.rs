// SPDX-License-Identifier: MIT OR Apache-2.0

//! Categorised JSON configuration for the VIB34D visualizer.
//!
//! This crate loads the four configuration documents the visualizer is driven by,
//! checks each against its category's required top-level keys, keeps the current ones
//! in a store and republishes every change as a typed event.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and rules (`ConfigCategory`, `ConfigDocument`,
//!   validation, events, errors)
//! - **Ports**: Trait definitions for collaborators (`DocumentSource`, `DocumentParser`,
//!   `ConfigWatcher`, listeners)
//! - **Adapters**: Implementations for specific transports (in-memory, files, HTTP)
//! - **Service**: `JsonConfigSystem`, which orchestrates loading, storing and publishing
//!
//! # Categories
//!
//! | category | default source | required keys |
//! |---|---|---|
//! | `layout` | `layout-content.json` | `layout`, `components`, `cards` |
//! | `visuals` | `visuals.json` | `themes`, `geometries`, `parameters` |
//! | `behavior` | `behavior.json` | `interactionBlueprints` |
//! | `stateMap` | `state-map.json` | `states`, `initialState` |
//!
//! # Events
//!
//! - `configLoaded` once all four categories loaded, carrying a snapshot
//! - `<category>ConfigLoaded` after each successful load
//! - `<category>ConfigUpdated` after each accepted [`update`](service::JsonConfigSystem::update)
//!
//! # Feature Flags
//!
//! - `fs`: Enable the file system source (default)
//! - `http`: Enable the HTTP source
//! - `reload`: Enable reloading categories when their files change
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use vib34d_config::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let source = InMemorySource::new()
//!     .with_document("layout-content.json", r#"{"layout": {"title": "Home"}, "components": {}, "cards": []}"#);
//!
//! let system = JsonConfigSystem::builder().with_source(source).build()?;
//!
//! system.subscribe(EventName::Loaded(ConfigCategory::Layout), |event| {
//!     println!("{} fired", event.name);
//!     Ok(())
//! });
//!
//! system.load(ConfigCategory::Layout).await?;
//! let title = system.get_value_or(ConfigCategory::Layout, "layout.title", "Untitled".into());
//! assert_eq!(title, "Home");
//! # Ok::<(), ConfigError>(())
//! # }).unwrap();
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigCategory, ConfigDocument, ConfigError, ConfigEvent, ConfigPath, ConfigSnapshot,
        ConfigurationService, EventName, EventPayload, Result, SourceNames,
    };
    pub use crate::ports::{
        ConfigListener, ConfigWatcher, DocumentParser, DocumentSource, SourceResponse,
        SubscriptionId,
    };
    pub use crate::service::{ConfigSystemBuilder, EventPublisher, JsonConfigSystem};

    pub use crate::adapters::{InMemorySource, JsonParser};
    // Re-export adapters based on feature flags
    #[cfg(feature = "fs")]
    pub use crate::adapters::FileSource;
    #[cfg(feature = "reload")]
    pub use crate::adapters::FileWatcher;
    #[cfg(feature = "http")]
    pub use crate::adapters::HttpSource;
}
