// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed set of configuration categories.
//!
//! Every document the system manages belongs to exactly one [`ConfigCategory`]. The
//! category fixes the default source name the document is retrieved from and the
//! top-level keys it must carry to be accepted.

use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four kinds of configuration document.
///
/// # Examples
///
/// ```
/// use vib34d_config::domain::ConfigCategory;
///
/// let category: ConfigCategory = "stateMap".parse().unwrap();
/// assert_eq!(category, ConfigCategory::StateMap);
/// assert_eq!(category.default_source_name(), "state-map.json");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigCategory {
    /// Page layout, components and cards.
    Layout,
    /// Themes, geometries and visual parameters.
    Visuals,
    /// Interaction blueprints.
    Behavior,
    /// Named UI states and the initial one.
    StateMap,
}

impl ConfigCategory {
    /// All categories, in the order their slots are laid out in a snapshot.
    pub const ALL: [ConfigCategory; 4] = [
        ConfigCategory::Layout,
        ConfigCategory::Visuals,
        ConfigCategory::Behavior,
        ConfigCategory::StateMap,
    ];

    /// Returns the category's canonical name, as used in event names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigCategory::Layout => "layout",
            ConfigCategory::Visuals => "visuals",
            ConfigCategory::Behavior => "behavior",
            ConfigCategory::StateMap => "stateMap",
        }
    }

    /// Returns the source name the category is loaded from unless overridden.
    pub fn default_source_name(&self) -> &'static str {
        match self {
            ConfigCategory::Layout => "layout-content.json",
            ConfigCategory::Visuals => "visuals.json",
            ConfigCategory::Behavior => "behavior.json",
            ConfigCategory::StateMap => "state-map.json",
        }
    }

    /// Returns the top-level keys a document of this category must carry.
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            ConfigCategory::Layout => &["layout", "components", "cards"],
            ConfigCategory::Visuals => &["themes", "geometries", "parameters"],
            ConfigCategory::Behavior => &["interactionBlueprints"],
            ConfigCategory::StateMap => &["states", "initialState"],
        }
    }
}

impl FromStr for ConfigCategory {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for ConfigCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
