// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the categories, documents, events and validation rules of the
//! configuration system. It is independent of any transport and defines the
//! fundamental concepts used throughout the library.

pub mod category;
pub mod config_path;
pub mod document;
pub mod errors;
pub mod events;
pub mod service;
pub mod snapshot;
pub mod source_names;
pub mod validator;

// Re-export commonly used types
pub use category::ConfigCategory;
pub use config_path::ConfigPath;
pub use document::{is_truthy, ConfigDocument};
pub use errors::{ConfigError, Result};
pub use events::{ConfigEvent, EventName, EventPayload};
pub use service::ConfigurationService;
pub use snapshot::ConfigSnapshot;
pub use source_names::SourceNames;
pub use validator::{validate, validate_named};
