// SPDX-License-Identifier: MIT OR Apache-2.0

//! The JSON-backed configuration system.
//!
//! This module provides `JsonConfigSystem`, which retrieves, decodes and validates the
//! four category documents, keeps the current ones in a store and republishes every
//! change through its own `EventPublisher`.

use crate::adapters::JsonParser;
use crate::domain::{
    validator, ConfigCategory, ConfigDocument, ConfigError, ConfigEvent, ConfigPath,
    ConfigSnapshot, ConfigurationService, EventName, Result, SourceNames,
};
use crate::ports::{DocumentParser, DocumentSource, ListenerFailure, SubscriptionId};
use crate::service::publisher::EventPublisher;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

/// Loads, validates, stores and publishes the four configuration documents.
///
/// Each category is an independent unit: a failed load of one never touches the
/// documents already stored for the others. A stored document is always one that
/// passed its category's validator when it was stored, and every store write is
/// followed by exactly one notification.
///
/// Loads of the same category racing each other resolve as last completion wins.
///
/// # Examples
///
/// ```rust
/// use vib34d_config::prelude::*;
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let source = InMemorySource::new()
///     .with_document("layout-content.json", r#"{"layout": {"title": "Home"}, "components": {}, "cards": []}"#)
///     .with_document("visuals.json", r#"{"themes": [], "geometries": [], "parameters": {}}"#)
///     .with_document("behavior.json", r#"{"interactionBlueprints": {}}"#)
///     .with_document("state-map.json", r#"{"states": {}, "initialState": "home"}"#);
///
/// let system = JsonConfigSystem::builder()
///     .with_source(source)
///     .build()?;
///
/// let snapshot = system.load_all().await?;
/// assert!(snapshot.is_complete());
/// assert_eq!(
///     system.get_value(ConfigCategory::Layout, "layout.title"),
///     Some(serde_json::json!("Home"))
/// );
/// # Ok::<(), ConfigError>(())
/// # }).unwrap();
/// ```
pub struct JsonConfigSystem {
    source: Arc<dyn DocumentSource>,
    parser: Box<dyn DocumentParser>,
    source_names: SourceNames,
    store: RwLock<ConfigSnapshot>,
    publisher: EventPublisher,
}

impl JsonConfigSystem {
    /// Creates a system reading from `source` with the default source names and parser.
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self::from_parts(source, Box::new(JsonParser::new()), SourceNames::default())
    }

    /// Creates a new configuration system builder.
    pub fn builder() -> ConfigSystemBuilder {
        ConfigSystemBuilder::new()
    }

    fn from_parts(
        source: Arc<dyn DocumentSource>,
        parser: Box<dyn DocumentParser>,
        source_names: SourceNames,
    ) -> Self {
        Self {
            source,
            parser,
            source_names,
            store: RwLock::new(ConfigSnapshot::new()),
            publisher: EventPublisher::new(),
        }
    }

    /// Returns the source name a category is loaded from.
    pub fn source_name(&self, category: ConfigCategory) -> &str {
        self.source_names.get(category)
    }

    /// Returns the full category to source-name mapping.
    pub fn source_names(&self) -> &SourceNames {
        &self.source_names
    }

    /// Returns the publisher events are dispatched through.
    pub fn events(&self) -> &EventPublisher {
        &self.publisher
    }

    /// Loads every category concurrently.
    ///
    /// All four loads are started before any is awaited, and every one is allowed to
    /// settle. Each success is stored and announced as it completes. If all succeed,
    /// the aggregate `configLoaded` event fires once with the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first failure in completion order. Categories that succeeded keep
    /// their new documents and their per-category events have already fired.
    pub async fn load_all(&self) -> Result<ConfigSnapshot> {
        let mut pending: FuturesUnordered<_> = ConfigCategory::ALL
            .into_iter()
            .map(|category| self.load(category))
            .collect();

        let mut first_error = None;
        while let Some(result) = pending.next().await {
            if let Err(e) = result {
                match first_error {
                    None => first_error = Some(e),
                    Some(_) => tracing::debug!("Additional load failure: {}", e),
                }
            }
        }

        if let Some(e) = first_error {
            tracing::error!("Error loading configs: {}", e);
            return Err(e);
        }

        let snapshot = self.snapshot();
        tracing::info!("All configuration categories loaded");
        self.publisher.emit(&ConfigEvent::all_loaded(snapshot.clone()))?;
        Ok(snapshot)
    }

    /// Loads one category from its configured source name.
    pub async fn load(&self, category: ConfigCategory) -> Result<ConfigDocument> {
        self.load_from(category, self.source_names.get(category))
            .await
    }

    /// Loads one category from an explicit source name.
    ///
    /// The steps run in order: fetch, status check, decode, validate, store, notify.
    /// Any failure before the store step leaves the stored document untouched.
    ///
    /// # Errors
    ///
    /// * `ConfigError::RetrievalError` - The source failed or answered a non-2xx status
    /// * `ConfigError::DecodeError` - The body is not well-formed
    /// * `ConfigError::ValidationError` - The document lacks a required key
    /// * `ConfigError::ListenerError` - The document was stored but a listener failed
    pub async fn load_from(
        &self,
        category: ConfigCategory,
        source_name: &str,
    ) -> Result<ConfigDocument> {
        let document = match self.retrieve(category, source_name).await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Error loading {} config: {}", category, e);
                return Err(e);
            }
        };

        tracing::info!("Loaded {} config from {}", category, source_name);
        self.store_and_publish(
            category,
            &document,
            ConfigEvent::loaded(category, document.clone()),
        )?;
        Ok(document)
    }

    async fn retrieve(&self, category: ConfigCategory, source_name: &str) -> Result<ConfigDocument> {
        tracing::debug!(
            "Fetching {} config from {} via {}",
            category,
            source_name,
            self.source.name()
        );

        let response = self
            .source
            .fetch(source_name)
            .await
            .map_err(|e| ConfigError::from_transport_error(category, source_name, e))?;

        if !response.is_success() {
            return Err(ConfigError::from_status(
                category,
                source_name,
                response.status,
            ));
        }

        let value = self
            .parser
            .parse(&response.body)
            .map_err(|source| ConfigError::DecodeError {
                category,
                source_name: source_name.to_string(),
                source,
            })?;

        if !validator::validate(category, &value) {
            tracing::warn!(
                "Rejected {} config from {}: missing required keys",
                category,
                source_name
            );
            return Err(ConfigError::ValidationError { category });
        }

        Ok(ConfigDocument::new(value))
    }

    /// Stores a caller-supplied document and announces it as `<category>ConfigUpdated`.
    ///
    /// # Errors
    ///
    /// * `ConfigError::ValidationError` - Rejected; the store is unchanged and no
    ///   event fires
    /// * `ConfigError::ListenerError` - Stored, but a listener failed
    pub fn update(
        &self,
        category: ConfigCategory,
        document: impl Into<ConfigDocument>,
    ) -> Result<ConfigDocument> {
        let document = document.into();
        if !validator::validate(category, document.as_value()) {
            tracing::warn!("Rejected {} config update: missing required keys", category);
            return Err(ConfigError::ValidationError { category });
        }

        tracing::info!("Updated {} config", category);
        self.store_and_publish(
            category,
            &document,
            ConfigEvent::updated(category, document.clone()),
        )?;
        Ok(document)
    }

    fn store_and_publish(
        &self,
        category: ConfigCategory,
        document: &ConfigDocument,
        event: ConfigEvent,
    ) -> Result<()> {
        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(category, document.clone());
        self.publisher.emit(&event)
    }

    /// Checks a candidate document against a category's shape rules.
    pub fn validate(&self, category: ConfigCategory, candidate: &Value) -> bool {
        validator::validate(category, candidate)
    }

    /// Like [`validate`](Self::validate), for a category given by name.
    ///
    /// Unknown names are always rejected.
    pub fn validate_named(&self, category: &str, candidate: &Value) -> bool {
        validator::validate_named(category, candidate)
    }

    /// Returns the document currently stored for a category.
    pub fn get(&self, category: ConfigCategory) -> Option<ConfigDocument> {
        self.read_store().get(category).cloned()
    }

    /// Like [`get`](Self::get), for a category given by name.
    ///
    /// Unknown names resolve to `None`.
    pub fn get_named(&self, category: &str) -> Option<ConfigDocument> {
        let category = category.parse().ok()?;
        self.get(category)
    }

    /// Resolves a dot-delimited path inside a category's stored document.
    ///
    /// Never fails: an empty category, a missing key or a non-object intermediate all
    /// resolve to `None`. There is no array indexing.
    pub fn get_value(&self, category: ConfigCategory, path: impl Into<ConfigPath>) -> Option<Value> {
        let store = self.read_store();
        store.get(category)?.lookup(path).cloned()
    }

    /// Resolves a path, falling back to `default` when it does not resolve.
    pub fn get_value_or(
        &self,
        category: ConfigCategory,
        path: impl Into<ConfigPath>,
        default: Value,
    ) -> Value {
        self.get_value(category, path).unwrap_or(default)
    }

    /// Resolves a path and deserializes the value into `T`.
    ///
    /// A value of the wrong shape resolves to `None`.
    pub fn get_value_as<T>(&self, category: ConfigCategory, path: impl Into<ConfigPath>) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let store = self.read_store();
        store.get(category)?.lookup_as(path)
    }

    /// Returns a copy of all four slots.
    pub fn snapshot(&self) -> ConfigSnapshot {
        self.read_store().clone()
    }

    /// Checks whether a category currently holds a document.
    pub fn has_config(&self, category: ConfigCategory) -> bool {
        self.read_store().get(category).is_some()
    }

    /// Checks whether all four categories hold a document.
    pub fn is_fully_loaded(&self) -> bool {
        self.read_store().is_complete()
    }

    fn read_store(&self) -> std::sync::RwLockReadGuard<'_, ConfigSnapshot> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a listener for an event.
    pub fn subscribe<F>(&self, event: EventName, listener: F) -> SubscriptionId
    where
        F: Fn(&ConfigEvent) -> std::result::Result<(), ListenerFailure> + Send + Sync + 'static,
    {
        self.publisher.subscribe_fn(event, listener)
    }

    /// Registers a listener for an event given by its published name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownEvent` if `event` is not a published name.
    pub fn subscribe_named<F>(&self, event: &str, listener: F) -> Result<SubscriptionId>
    where
        F: Fn(&ConfigEvent) -> std::result::Result<(), ListenerFailure> + Send + Sync + 'static,
    {
        let event: EventName = event.parse()?;
        Ok(self.subscribe(event, listener))
    }

    /// Removes a listener registration.
    pub fn unsubscribe(&self, event: EventName, id: SubscriptionId) -> bool {
        self.publisher.unsubscribe(event, id)
    }
}

impl ConfigurationService for JsonConfigSystem {
    fn get(&self, category: ConfigCategory) -> Option<ConfigDocument> {
        JsonConfigSystem::get(self, category)
    }

    fn get_value(&self, category: ConfigCategory, path: &ConfigPath) -> Option<Value> {
        JsonConfigSystem::get_value(self, category, path)
    }

    fn update(&self, category: ConfigCategory, document: ConfigDocument) -> Result<ConfigDocument> {
        JsonConfigSystem::update(self, category, document)
    }
}

impl std::fmt::Debug for JsonConfigSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonConfigSystem")
            .field("source", &self.source.name())
            .field("parser", &self.parser.format())
            .field("source_names", &self.source_names)
            .field("publisher", &self.publisher)
            .finish()
    }
}

/// Reloads a category on the current tokio runtime whenever `watcher` reports it.
///
/// Reload failures are logged by the load itself and otherwise dropped; the
/// previously stored document stays current.
///
/// # Errors
///
/// Returns `ConfigError::WatcherError` if called outside a tokio runtime or if the
/// watcher fails to start.
///
/// # Examples
///
/// ```rust,no_run
/// use vib34d_config::prelude::*;
/// use vib34d_config::service::spawn_reload_on_change;
/// use std::sync::Arc;
///
/// # async fn run() -> Result<()> {
/// let system = Arc::new(
///     JsonConfigSystem::builder()
///         .with_directory("/srv/vib34d/config")?
///         .build()?,
/// );
/// system.load_all().await?;
///
/// let mut watcher = FileWatcher::new("/srv/vib34d/config", system.source_names().clone(), None)?;
/// spawn_reload_on_change(Arc::clone(&system), &mut watcher)?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "reload")]
pub fn spawn_reload_on_change(
    system: Arc<JsonConfigSystem>,
    watcher: &mut dyn crate::ports::ConfigWatcher,
) -> Result<()> {
    let handle =
        tokio::runtime::Handle::try_current().map_err(|e| ConfigError::WatcherError {
            message: "Reloading requires a running tokio runtime".to_string(),
            source: Some(Box::new(e)),
        })?;

    watcher.watch(Arc::new(move |category| {
        let system = Arc::clone(&system);
        tracing::debug!("Reloading {} config after change", category);
        handle.spawn(async move {
            let _ = system.load(category).await;
        });
    }))
}

/// Builder for constructing a `JsonConfigSystem`.
///
/// # Examples
///
/// ```rust
/// use vib34d_config::prelude::*;
///
/// # fn main() -> Result<()> {
/// let system = ConfigSystemBuilder::new()
///     .with_source(InMemorySource::new())
///     .with_source_name(ConfigCategory::StateMap, "states.json")
///     .build()?;
/// assert_eq!(system.source_name(ConfigCategory::StateMap), "states.json");
/// # Ok(())
/// # }
/// ```
pub struct ConfigSystemBuilder {
    source: Option<Arc<dyn DocumentSource>>,
    parser: Option<Box<dyn DocumentParser>>,
    source_names: SourceNames,
}

impl ConfigSystemBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            source: None,
            parser: None,
            source_names: SourceNames::default(),
        }
    }

    /// Sets the document source.
    pub fn with_source(self, source: impl DocumentSource + 'static) -> Self {
        self.with_shared_source(Arc::new(source))
    }

    /// Sets a document source that is shared with other owners.
    pub fn with_shared_source(mut self, source: Arc<dyn DocumentSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Serves documents from the files in `dir`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use vib34d_config::service::ConfigSystemBuilder;
    ///
    /// # fn main() -> vib34d_config::domain::Result<()> {
    /// let system = ConfigSystemBuilder::new()
    ///     .with_directory("/srv/vib34d/config")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "fs")]
    pub fn with_directory(self, dir: impl AsRef<std::path::Path>) -> Result<Self> {
        use crate::adapters::FileSource;
        let source = FileSource::from_dir(dir)?;
        Ok(self.with_source(source))
    }

    /// Serves documents over HTTP relative to `base_url`.
    #[cfg(feature = "http")]
    pub fn with_base_url(self, base_url: &str) -> Result<Self> {
        use crate::adapters::HttpSource;
        let source = HttpSource::new(base_url)?;
        Ok(self.with_source(source))
    }

    /// Overrides the source name for one category.
    pub fn with_source_name(mut self, category: ConfigCategory, name: impl Into<String>) -> Self {
        self.source_names.set(category, name);
        self
    }

    /// Replaces the whole category to source-name mapping.
    pub fn with_source_names(mut self, source_names: SourceNames) -> Self {
        self.source_names = source_names;
        self
    }

    /// Sets the parser used to decode retrieved bytes.
    pub fn with_parser(mut self, parser: Box<dyn DocumentParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Builds the configuration system.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SourceMissing` if no source was set.
    pub fn build(self) -> Result<JsonConfigSystem> {
        let source = self.source.ok_or(ConfigError::SourceMissing)?;
        let parser = self
            .parser
            .unwrap_or_else(|| Box::new(JsonParser::new()));
        Ok(JsonConfigSystem::from_parts(source, parser, self.source_names))
    }
}

impl Default for ConfigSystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
