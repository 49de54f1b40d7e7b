// SPDX-License-Identifier: MIT OR Apache-2.0

//! Point-in-time view of the four configuration slots.

use crate::domain::category::ConfigCategory;
use crate::domain::document::ConfigDocument;
use serde::{Deserialize, Serialize};

/// The documents held for each category at one moment.
///
/// A slot is `None` until its category has been loaded or updated successfully.
/// Serializes with the category names as keys (`layout`, `visuals`, `behavior`,
/// `stateMap`), absent slots as `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    /// The layout document
    pub layout: Option<ConfigDocument>,
    /// The visuals document
    pub visuals: Option<ConfigDocument>,
    /// The behavior document
    pub behavior: Option<ConfigDocument>,
    /// The state-map document
    pub state_map: Option<ConfigDocument>,
}

impl ConfigSnapshot {
    /// Creates a snapshot with every slot absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the document held for a category, if any.
    pub fn get(&self, category: ConfigCategory) -> Option<&ConfigDocument> {
        self.slot(category).as_ref()
    }

    /// Returns `true` when all four categories hold a document.
    pub fn is_complete(&self) -> bool {
        ConfigCategory::ALL.iter().all(|c| self.get(*c).is_some())
    }

    /// Iterates over the categories that hold a document, in category order.
    pub fn iter(&self) -> impl Iterator<Item = (ConfigCategory, &ConfigDocument)> {
        ConfigCategory::ALL
            .into_iter()
            .filter_map(move |c| self.get(c).map(|doc| (c, doc)))
    }

    pub(crate) fn set(&mut self, category: ConfigCategory, document: ConfigDocument) {
        *self.slot_mut(category) = Some(document);
    }

    fn slot(&self, category: ConfigCategory) -> &Option<ConfigDocument> {
        match category {
            ConfigCategory::Layout => &self.layout,
            ConfigCategory::Visuals => &self.visuals,
            ConfigCategory::Behavior => &self.behavior,
            ConfigCategory::StateMap => &self.state_map,
        }
    }

    fn slot_mut(&mut self, category: ConfigCategory) -> &mut Option<ConfigDocument> {
        match category {
            ConfigCategory::Layout => &mut self.layout,
            ConfigCategory::Visuals => &mut self.visuals,
            ConfigCategory::Behavior => &mut self.behavior,
            ConfigCategory::StateMap => &mut self.state_map,
        }
    }
}
