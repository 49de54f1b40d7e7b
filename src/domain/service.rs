// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration access trait definition.
//!
//! This module defines the `ConfigurationService` trait, the synchronous read and
//! update interface the rendering and editor layers program against. Loading from
//! sources is asynchronous and lives on the concrete service.

use crate::domain::validator;
use crate::domain::{ConfigCategory, ConfigDocument, ConfigPath, Result};
use serde_json::Value;

/// The main configuration access trait.
///
/// Reads are total: they never fail for a known category, they return `None` when
/// nothing is stored or the path does not resolve.
///
/// # Examples
///
/// ```rust
/// use vib34d_config::domain::{ConfigCategory, ConfigDocument, ConfigPath, ConfigurationService, Result};
/// use serde_json::{json, Value};
///
/// struct FixedLayout(ConfigDocument);
///
/// impl ConfigurationService for FixedLayout {
///     fn get(&self, category: ConfigCategory) -> Option<ConfigDocument> {
///         (category == ConfigCategory::Layout).then(|| self.0.clone())
///     }
///
///     fn get_value(&self, category: ConfigCategory, path: &ConfigPath) -> Option<Value> {
///         self.get(category)?.lookup(path).cloned()
///     }
///
///     fn update(&self, _category: ConfigCategory, document: ConfigDocument) -> Result<ConfigDocument> {
///         Ok(document)
///     }
/// }
///
/// let service = FixedLayout(ConfigDocument::new(json!({"layout": {"title": "Home"}})));
/// let title = service.get_value(ConfigCategory::Layout, &ConfigPath::from("layout.title"));
/// assert_eq!(title, Some(json!("Home")));
/// assert!(!service.has(ConfigCategory::Visuals));
/// ```
pub trait ConfigurationService {
    /// Returns the document currently stored for a category.
    ///
    /// # Returns
    ///
    /// * `Some(ConfigDocument)` - The most recently accepted document
    /// * `None` - The category has never been loaded or updated
    fn get(&self, category: ConfigCategory) -> Option<ConfigDocument>;

    /// Resolves a dot-delimited path inside a category's stored document.
    ///
    /// Returns `None` if the category is empty, a key along the path is missing, or an
    /// intermediate value is `null` or not an object.
    fn get_value(&self, category: ConfigCategory, path: &ConfigPath) -> Option<Value>;

    /// Validates and stores a caller-supplied document for a category.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigDocument)` - The document now stored
    /// * `Err(ConfigError::ValidationError)` - The document was rejected; the store is
    ///   unchanged
    fn update(&self, category: ConfigCategory, document: ConfigDocument)
        -> Result<ConfigDocument>;

    /// Resolves a path, falling back to `default` when it does not resolve.
    fn get_value_or(&self, category: ConfigCategory, path: &ConfigPath, default: Value) -> Value {
        self.get_value(category, path).unwrap_or(default)
    }

    /// Checks whether a category currently holds a document.
    fn has(&self, category: ConfigCategory) -> bool {
        self.get(category).is_some()
    }

    /// Checks a candidate document against a category's shape rules.
    fn validate(&self, category: ConfigCategory, candidate: &Value) -> bool {
        validator::validate(category, candidate)
    }
}
