// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dot-delimited lookup path newtype.
//!
//! This module provides the `ConfigPath` type, a newtype wrapper around `String` that
//! names a value inside a configuration document, such as `layout.title`.

use std::fmt;

/// A dot-delimited path into a configuration document.
///
/// Each segment is a plain mapping key; there is no array-index syntax. The path is
/// split on every `.`, so an empty path has a single empty segment.
///
/// # Examples
///
/// ```
/// use vib34d_config::domain::ConfigPath;
///
/// let path = ConfigPath::from("layout.header.title");
/// let segments: Vec<_> = path.segments().collect();
/// assert_eq!(segments, vec!["layout", "header", "title"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConfigPath(String);

impl ConfigPath {
    /// Creates a new `ConfigPath` from a `String`.
    pub fn new(path: String) -> Self {
        ConfigPath(path)
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the mapping keys the path walks through, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Converts the `ConfigPath` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ConfigPath {
    fn from(s: String) -> Self {
        ConfigPath(s)
    }
}

impl From<&str> for ConfigPath {
    fn from(s: &str) -> Self {
        ConfigPath(s.to_string())
    }
}

impl From<&ConfigPath> for ConfigPath {
    fn from(path: &ConfigPath) -> Self {
        path.clone()
    }
}

impl From<ConfigPath> for String {
    fn from(path: ConfigPath) -> Self {
        path.0
    }
}

impl AsRef<str> for ConfigPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
