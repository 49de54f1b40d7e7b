// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON document parser.

use crate::ports::DocumentParser;
use serde_json::Value;

/// JSON parser implementation.
///
/// Leading UTF-8 byte-order marks are skipped, since editors on some platforms write
/// them into hand-edited configuration files.
///
/// # Examples
///
/// ```rust
/// use vib34d_config::adapters::JsonParser;
/// use vib34d_config::ports::DocumentParser;
///
/// let parser = JsonParser::new();
/// let value = parser.parse(br#"{"themes": []}"#).unwrap();
/// assert!(value["themes"].is_array());
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }
}

impl DocumentParser for JsonParser {
    fn parse(&self, content: &[u8]) -> Result<Value, serde_json::Error> {
        let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
        serde_json::from_slice(content)
    }

    fn format(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object() {
        let parser = JsonParser::new();
        let value = parser
            .parse(br#"{"states": {"idle": {}}, "initialState": "idle"}"#)
            .unwrap();
        assert_eq!(value, json!({"states": {"idle": {}}, "initialState": "idle"}));
    }

    #[test]
    fn test_parse_non_object_values() {
        let parser = JsonParser::new();
        assert_eq!(parser.parse(b"null").unwrap(), Value::Null);
        assert_eq!(parser.parse(b"[1, 2]").unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_parse_with_bom() {
        let parser = JsonParser::new();
        let value = parser.parse(b"\xEF\xBB\xBF{\"a\": 1}").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_parse_truncated() {
        let parser = JsonParser::new();
        assert!(parser.parse(br#"{"layout": {"#).is_err());
    }

    #[test]
    fn test_parse_empty() {
        let parser = JsonParser::new();
        assert!(parser.parse(b"").is_err());
    }

    #[test]
    fn test_parse_trailing_garbage() {
        let parser = JsonParser::new();
        assert!(parser.parse(br#"{"a": 1} extra"#).is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(JsonParser::new().format(), "json");
    }
}
