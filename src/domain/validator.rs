// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shape validation for configuration documents.
//!
//! Validation is shallow: a document is accepted when it is a JSON object
//! whose category-specific required top-level keys are all present and truthy. Nested
//! values are not inspected.

use crate::domain::category::ConfigCategory;
use crate::domain::document::is_truthy;
use serde_json::Value;

/// Checks a candidate document against its category's required keys.
///
/// Anything other than a JSON object is rejected without further inspection.
///
/// # Examples
///
/// ```
/// use vib34d_config::domain::{validate, ConfigCategory};
/// use serde_json::json;
///
/// let doc = json!({"themes": [], "geometries": [], "parameters": {}});
/// assert!(validate(ConfigCategory::Visuals, &doc));
/// assert!(!validate(ConfigCategory::Visuals, &json!({"themes": []})));
/// ```
pub fn validate(category: ConfigCategory, candidate: &Value) -> bool {
    let Some(object) = candidate.as_object() else {
        return false;
    };
    category
        .required_keys()
        .iter()
        .all(|key| object.get(*key).map(is_truthy).unwrap_or(false))
}

/// Checks a candidate document against a category given by name.
///
/// Names that are not one of the known categories always fail validation.
///
/// # Examples
///
/// ```
/// use vib34d_config::domain::validate_named;
/// use serde_json::json;
///
/// assert!(validate_named("behavior", &json!({"interactionBlueprints": {}})));
/// assert!(!validate_named("shaders", &json!({"interactionBlueprints": {}})));
/// ```
pub fn validate_named(category: &str, candidate: &Value) -> bool {
    category
        .parse::<ConfigCategory>()
        .map(|category| validate(category, candidate))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_documents() {
        assert!(validate(
            ConfigCategory::Layout,
            &json!({"layout": {}, "components": {}, "cards": []})
        ));
        assert!(validate(
            ConfigCategory::Visuals,
            &json!({"themes": [], "geometries": [], "parameters": {}})
        ));
        assert!(validate(
            ConfigCategory::Behavior,
            &json!({"interactionBlueprints": {}})
        ));
        assert!(validate(
            ConfigCategory::StateMap,
            &json!({"states": {}, "initialState": "home"})
        ));
    }

    #[test]
    fn test_missing_keys_rejected() {
        assert!(!validate(ConfigCategory::Visuals, &json!({"themes": []})));
        assert!(!validate(
            ConfigCategory::Layout,
            &json!({"layout": {}, "components": {}})
        ));
        assert!(!validate(ConfigCategory::StateMap, &json!({"states": {}})));
    }

    #[test]
    fn test_falsy_values_rejected() {
        assert!(!validate(
            ConfigCategory::StateMap,
            &json!({"states": {}, "initialState": ""})
        ));
        assert!(!validate(
            ConfigCategory::Behavior,
            &json!({"interactionBlueprints": null})
        ));
        assert!(!validate(
            ConfigCategory::Behavior,
            &json!({"interactionBlueprints": 0})
        ));
        assert!(!validate(
            ConfigCategory::Behavior,
            &json!({"interactionBlueprints": false})
        ));
    }

    #[test]
    fn test_nested_types_are_not_checked() {
        assert!(validate(
            ConfigCategory::Layout,
            &json!({"layout": 1, "components": true, "cards": "not a list"})
        ));
    }

    #[test]
    fn test_extra_keys_allowed() {
        assert!(validate(
            ConfigCategory::Behavior,
            &json!({"interactionBlueprints": {}, "version": 2})
        ));
    }

    #[test]
    fn test_non_objects_rejected() {
        for candidate in [
            json!(null),
            json!(true),
            json!(42),
            json!("layout"),
            json!([{"interactionBlueprints": {}}]),
        ] {
            assert!(!validate(ConfigCategory::Behavior, &candidate));
        }
    }

    #[test]
    fn test_wrong_category_rejected() {
        let layout = json!({"layout": {}, "components": {}, "cards": []});
        assert!(!validate(ConfigCategory::Visuals, &layout));
        assert!(!validate(ConfigCategory::StateMap, &layout));
    }

    #[test]
    fn test_unknown_category_name() {
        let doc = json!({"layout": {}, "components": {}, "cards": []});
        assert!(validate_named("layout", &doc));
        assert!(!validate_named("unknown", &doc));
        assert!(!validate_named("", &doc));
    }
}
