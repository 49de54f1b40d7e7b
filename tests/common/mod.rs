// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};
use vib34d_config::adapters::InMemorySource;
use vib34d_config::domain::{ConfigCategory, ConfigError, ConfigEvent, EventName, Result};
use vib34d_config::ports::{DocumentSource, SourceResponse};
use vib34d_config::service::JsonConfigSystem;

pub const LAYOUT: &str =
    r#"{"layout": {"title": "Home", "grid": {"columns": 3}}, "components": {"header": {}}, "cards": [{"id": "intro"}]}"#;
pub const VISUALS: &str = r#"{"themes": [], "geometries": [], "parameters": {}}"#;
pub const BEHAVIOR: &str = r#"{"interactionBlueprints": {"hover": {"intensity": 0.8}}}"#;
pub const STATE_MAP: &str = r#"{"states": {"home": {"next": "gallery"}}, "initialState": "home"}"#;

/// Returns the valid fixture document for a category.
pub fn document_for(category: ConfigCategory) -> &'static str {
    match category {
        ConfigCategory::Layout => LAYOUT,
        ConfigCategory::Visuals => VISUALS,
        ConfigCategory::Behavior => BEHAVIOR,
        ConfigCategory::StateMap => STATE_MAP,
    }
}

/// An in-memory source serving a valid document for every category.
pub fn full_source() -> InMemorySource {
    ConfigCategory::ALL
        .into_iter()
        .fold(InMemorySource::new(), |source, category| {
            source.with_document(category.default_source_name(), document_for(category))
        })
}

/// Writes the fixture documents into `dir` under their default names.
pub fn write_fixture_dir(dir: &Path) {
    for category in ConfigCategory::ALL {
        std::fs::write(
            dir.join(category.default_source_name()),
            document_for(category),
        )
        .unwrap();
    }
}

/// Builds a system around a shared in-memory source.
pub fn system_with(source: Arc<InMemorySource>) -> JsonConfigSystem {
    JsonConfigSystem::builder()
        .with_shared_source(source)
        .build()
        .unwrap()
}

/// Records the name of every event delivered for `events`, in delivery order.
pub fn record_events(
    system: &JsonConfigSystem,
    events: impl IntoIterator<Item = EventName>,
) -> Arc<Mutex<Vec<String>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    for event in events {
        let log = Arc::clone(&log);
        system.subscribe(event, move |e: &ConfigEvent| {
            log.lock().unwrap().push(e.name.to_string());
            Ok(())
        });
    }
    log
}

/// Every event name the system publishes.
pub fn all_event_names() -> Vec<EventName> {
    let mut names = vec![EventName::AllLoaded];
    for category in ConfigCategory::ALL {
        names.push(EventName::Loaded(category));
        names.push(EventName::Updated(category));
    }
    names
}

/// A source whose transport fails for one name and delegates the rest.
pub struct FlakySource {
    inner: InMemorySource,
    failing: String,
}

impl FlakySource {
    pub fn new(inner: InMemorySource, failing: impl Into<String>) -> Self {
        Self {
            inner,
            failing: failing.into(),
        }
    }
}

#[async_trait]
impl DocumentSource for FlakySource {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn fetch(&self, name: &str) -> Result<SourceResponse> {
        if name == self.failing {
            return Err(ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "timed out",
            )));
        }
        self.inner.fetch(name).await
    }
}

/// A source that only answers once `parties` fetches are in flight at the same time.
pub struct RendezvousSource {
    inner: InMemorySource,
    barrier: tokio::sync::Barrier,
}

impl RendezvousSource {
    pub fn new(inner: InMemorySource, parties: usize) -> Self {
        Self {
            inner,
            barrier: tokio::sync::Barrier::new(parties),
        }
    }
}

#[async_trait]
impl DocumentSource for RendezvousSource {
    fn name(&self) -> &str {
        "rendezvous"
    }

    async fn fetch(&self, name: &str) -> Result<SourceResponse> {
        self.barrier.wait().await;
        self.inner.fetch(name).await
    }
}
