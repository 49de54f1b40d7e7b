// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document parser trait definition.
//!
//! This module defines the `DocumentParser` trait, which turns the raw bytes served by
//! a source into a structured JSON value.

use serde_json::Value;

/// A trait for decoding raw document bytes.
///
/// Parsers produce a `serde_json::Value` so validation and path lookup work the same
/// regardless of the on-disk format. Parse failures are reported as
/// `serde_json::Error`; the loader attaches the category and source name.
///
/// # Examples
///
/// ```rust
/// use vib34d_config::ports::DocumentParser;
/// use serde_json::Value;
///
/// struct EmptyParser;
///
/// impl DocumentParser for EmptyParser {
///     fn parse(&self, _content: &[u8]) -> Result<Value, serde_json::Error> {
///         Ok(Value::Object(Default::default()))
///     }
///
///     fn format(&self) -> &str {
///         "empty"
///     }
/// }
///
/// assert!(EmptyParser.parse(b"anything").unwrap().is_object());
/// ```
pub trait DocumentParser: Send + Sync {
    /// Decodes raw bytes into a JSON value.
    fn parse(&self, content: &[u8]) -> Result<Value, serde_json::Error>;

    /// Returns a short name for the format this parser reads, used in logs.
    fn format(&self) -> &str;
}
