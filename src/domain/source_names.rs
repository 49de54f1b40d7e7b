// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category to source-name mapping.

use crate::domain::category::ConfigCategory;
use serde::{Deserialize, Serialize};

/// The source name each category is retrieved from.
///
/// Defaults to the reference filenames. Deserializing a partial mapping keeps the
/// defaults for the categories it leaves out, so a manifest only needs to list
/// overrides.
///
/// # Examples
///
/// ```
/// use vib34d_config::domain::{ConfigCategory, SourceNames};
///
/// let names: SourceNames = serde_json::from_str(r#"{"stateMap": "states.json"}"#).unwrap();
/// assert_eq!(names.get(ConfigCategory::StateMap), "states.json");
/// assert_eq!(names.get(ConfigCategory::Layout), "layout-content.json");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceNames {
    /// Source of the layout document
    pub layout: String,
    /// Source of the visuals document
    pub visuals: String,
    /// Source of the behavior document
    pub behavior: String,
    /// Source of the state-map document
    pub state_map: String,
}

impl SourceNames {
    /// Returns the source name for a category.
    pub fn get(&self, category: ConfigCategory) -> &str {
        match category {
            ConfigCategory::Layout => &self.layout,
            ConfigCategory::Visuals => &self.visuals,
            ConfigCategory::Behavior => &self.behavior,
            ConfigCategory::StateMap => &self.state_map,
        }
    }

    /// Replaces the source name for a category.
    pub fn set(&mut self, category: ConfigCategory, name: impl Into<String>) {
        let slot = match category {
            ConfigCategory::Layout => &mut self.layout,
            ConfigCategory::Visuals => &mut self.visuals,
            ConfigCategory::Behavior => &mut self.behavior,
            ConfigCategory::StateMap => &mut self.state_map,
        };
        *slot = name.into();
    }

    /// Finds the category served from a source name.
    ///
    /// If several categories share a name the first in category order wins.
    pub fn category_for(&self, name: &str) -> Option<ConfigCategory> {
        ConfigCategory::ALL
            .into_iter()
            .find(|category| self.get(*category) == name)
    }
}

impl Default for SourceNames {
    fn default() -> Self {
        Self {
            layout: ConfigCategory::Layout.default_source_name().to_string(),
            visuals: ConfigCategory::Visuals.default_source_name().to_string(),
            behavior: ConfigCategory::Behavior.default_source_name().to_string(),
            state_map: ConfigCategory::StateMap.default_source_name().to_string(),
        }
    }
}
