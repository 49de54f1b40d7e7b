// SPDX-License-Identifier: MIT OR Apache-2.0

//! Events published by the configuration system.
//!
//! There is one aggregate event, `configLoaded`, and two per-category events,
//! `<category>ConfigLoaded` and `<category>ConfigUpdated`. The first carries a snapshot
//! of all four slots; the others carry the single document that changed.

use crate::domain::category::ConfigCategory;
use crate::domain::document::ConfigDocument;
use crate::domain::errors::ConfigError;
use crate::domain::snapshot::ConfigSnapshot;
use std::fmt;
use std::str::FromStr;

const ALL_LOADED: &str = "configLoaded";
const LOADED_SUFFIX: &str = "ConfigLoaded";
const UPDATED_SUFFIX: &str = "ConfigUpdated";

/// The name an event is published and subscribed under.
///
/// # Examples
///
/// ```
/// use vib34d_config::domain::{ConfigCategory, EventName};
///
/// let name = EventName::Loaded(ConfigCategory::StateMap);
/// assert_eq!(name.to_string(), "stateMapConfigLoaded");
/// assert_eq!("stateMapConfigLoaded".parse::<EventName>().unwrap(), name);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventName {
    /// Every category finished loading (`configLoaded`).
    AllLoaded,
    /// A category was loaded from its source (`<category>ConfigLoaded`).
    Loaded(ConfigCategory),
    /// A category was replaced by a caller-supplied document (`<category>ConfigUpdated`).
    Updated(ConfigCategory),
}

impl EventName {
    /// Returns the category the event concerns, or `None` for the aggregate event.
    pub fn category(&self) -> Option<ConfigCategory> {
        match self {
            EventName::AllLoaded => None,
            EventName::Loaded(c) | EventName::Updated(c) => Some(*c),
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventName::AllLoaded => f.write_str(ALL_LOADED),
            EventName::Loaded(c) => write!(f, "{}{}", c, LOADED_SUFFIX),
            EventName::Updated(c) => write!(f, "{}{}", c, UPDATED_SUFFIX),
        }
    }
}

impl FromStr for EventName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_LOADED {
            return Ok(EventName::AllLoaded);
        }
        let unknown = || ConfigError::UnknownEvent {
            name: s.to_string(),
        };
        if let Some(prefix) = s.strip_suffix(LOADED_SUFFIX) {
            let category = prefix.parse().map_err(|_| unknown())?;
            return Ok(EventName::Loaded(category));
        }
        if let Some(prefix) = s.strip_suffix(UPDATED_SUFFIX) {
            let category = prefix.parse().map_err(|_| unknown())?;
            return Ok(EventName::Updated(category));
        }
        Err(unknown())
    }
}

/// The data delivered with an event.
#[derive(Clone, Debug, PartialEq)]
pub enum EventPayload {
    /// All four slots, as they were when the event fired.
    Snapshot(ConfigSnapshot),
    /// The single document that was just stored.
    Document(ConfigDocument),
}

/// An event delivered to listeners.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigEvent {
    /// The name the event was published under
    pub name: EventName,
    /// The event data
    pub payload: EventPayload,
}

impl ConfigEvent {
    /// Creates the aggregate `configLoaded` event.
    pub fn all_loaded(snapshot: ConfigSnapshot) -> Self {
        Self {
            name: EventName::AllLoaded,
            payload: EventPayload::Snapshot(snapshot),
        }
    }

    /// Creates a `<category>ConfigLoaded` event.
    pub fn loaded(category: ConfigCategory, document: ConfigDocument) -> Self {
        Self {
            name: EventName::Loaded(category),
            payload: EventPayload::Document(document),
        }
    }

    /// Creates a `<category>ConfigUpdated` event.
    pub fn updated(category: ConfigCategory, document: ConfigDocument) -> Self {
        Self {
            name: EventName::Updated(category),
            payload: EventPayload::Document(document),
        }
    }

    /// Returns the document carried by a per-category event.
    pub fn document(&self) -> Option<&ConfigDocument> {
        match &self.payload {
            EventPayload::Document(doc) => Some(doc),
            EventPayload::Snapshot(_) => None,
        }
    }

    /// Returns the snapshot carried by the aggregate event.
    pub fn snapshot(&self) -> Option<&ConfigSnapshot> {
        match &self.payload {
            EventPayload::Snapshot(snapshot) => Some(snapshot),
            EventPayload::Document(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_names() {
        assert_eq!(EventName::AllLoaded.to_string(), "configLoaded");
        assert_eq!(
            EventName::Loaded(ConfigCategory::Layout).to_string(),
            "layoutConfigLoaded"
        );
        assert_eq!(
            EventName::Updated(ConfigCategory::Visuals).to_string(),
            "visualsConfigUpdated"
        );
    }

    #[test]
    fn test_event_names_parse_back() {
        for category in ConfigCategory::ALL {
            for name in [EventName::Loaded(category), EventName::Updated(category)] {
                assert_eq!(name.to_string().parse::<EventName>().unwrap(), name);
            }
        }
        assert_eq!(
            "configLoaded".parse::<EventName>().unwrap(),
            EventName::AllLoaded
        );
    }

    #[test]
    fn test_unknown_event_names() {
        for name in [
            "",
            "configUpdated",
            "ConfigLoaded",
            "shadersConfigLoaded",
            "layoutConfigChanged",
            "layoutconfigloaded",
        ] {
            assert!(
                matches!(name.parse::<EventName>(), Err(ConfigError::UnknownEvent { .. })),
                "accepted {}",
                name
            );
        }
    }

    #[test]
    fn test_event_category() {
        assert_eq!(EventName::AllLoaded.category(), None);
        assert_eq!(
            EventName::Updated(ConfigCategory::Behavior).category(),
            Some(ConfigCategory::Behavior)
        );
    }

    #[test]
    fn test_event_payload_accessors() {
        let doc = ConfigDocument::new(json!({"interactionBlueprints": {}}));
        let event = ConfigEvent::loaded(ConfigCategory::Behavior, doc.clone());
        assert_eq!(event.document(), Some(&doc));
        assert!(event.snapshot().is_none());

        let event = ConfigEvent::all_loaded(ConfigSnapshot::new());
        assert!(event.document().is_none());
        assert_eq!(event.snapshot(), Some(&ConfigSnapshot::new()));
    }
}
