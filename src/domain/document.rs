// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration document type with total path lookup.
//!
//! This module provides the `ConfigDocument` type, which holds one decoded JSON
//! document and offers lookups that never fail: a missing key, a `null` along the
//! way or a non-object intermediate all resolve to `None`.

use crate::domain::config_path::ConfigPath;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A decoded configuration document.
///
/// The value is shared behind an `Arc`, so handing a document to listeners or taking
/// a snapshot of the store never copies the underlying JSON. Two handles to the same
/// stored document can be told apart from equal-but-distinct documents with
/// [`ConfigDocument::ptr_eq`].
///
/// # Examples
///
/// ```
/// use vib34d_config::domain::ConfigDocument;
/// use serde_json::json;
///
/// let doc = ConfigDocument::new(json!({"layout": {"title": "Home"}}));
/// assert_eq!(doc.lookup("layout.title"), Some(&json!("Home")));
/// assert_eq!(doc.lookup("layout.missing.deep"), None);
/// ```
#[derive(Clone, PartialEq)]
pub struct ConfigDocument(Arc<Value>);

impl ConfigDocument {
    /// Creates a new `ConfigDocument` from a JSON value.
    pub fn new(value: Value) -> Self {
        ConfigDocument(Arc::new(value))
    }

    /// Returns the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Converts the document into an owned JSON value, cloning only if the document
    /// is still shared.
    pub fn into_value(self) -> Value {
        Arc::try_unwrap(self.0).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Returns `true` if both handles point at the same stored document.
    pub fn ptr_eq(a: &ConfigDocument, b: &ConfigDocument) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Resolves a dot-delimited path, one mapping key per segment.
    ///
    /// Returns `None` if any segment is missing or any intermediate value is not an
    /// object. A `null` stored at the final position is returned as-is.
    pub fn lookup(&self, path: impl Into<ConfigPath>) -> Option<&Value> {
        let path = path.into();
        let mut current = self.0.as_ref();
        for segment in path.segments() {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Resolves a path and deserializes the value found there.
    ///
    /// Returns `None` when the path does not resolve or the value has the wrong shape
    /// for `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vib34d_config::domain::ConfigDocument;
    /// use serde_json::json;
    ///
    /// let doc = ConfigDocument::new(json!({"parameters": {"speed": 1.5}}));
    /// let speed: Option<f64> = doc.lookup_as("parameters.speed");
    /// assert_eq!(speed, Some(1.5));
    /// let wrong: Option<String> = doc.lookup_as("parameters.speed");
    /// assert_eq!(wrong, None);
    /// ```
    pub fn lookup_as<T>(&self, path: impl Into<ConfigPath>) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let value = self.lookup(path)?;
        T::deserialize(value).ok()
    }
}

/// Reports whether a JSON value is truthy.
///
/// `null`, `false`, numeric zero and the empty string are falsy. Every other value,
/// including empty arrays and empty objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl From<Value> for ConfigDocument {
    fn from(value: Value) -> Self {
        ConfigDocument::new(value)
    }
}

impl From<ConfigDocument> for Value {
    fn from(doc: ConfigDocument) -> Self {
        doc.into_value()
    }
}

impl AsRef<Value> for ConfigDocument {
    fn as_ref(&self) -> &Value {
        &self.0
    }
}

impl fmt::Debug for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConfigDocument").field(&self.0).finish()
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ConfigDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConfigDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(ConfigDocument::new)
    }
}
