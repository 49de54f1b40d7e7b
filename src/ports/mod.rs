// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! between the configuration system and its collaborators. These traits are
//! implemented by adapters in the adapters layer, or by the host application.

pub mod listener;
pub mod parser;
pub mod source;
pub mod watcher;

// Re-export commonly used types
pub use listener::{ConfigListener, ListenerFailure, SubscriptionId};
pub use parser::DocumentParser;
pub use source::{DocumentSource, SourceResponse};
pub use watcher::{ChangeCallback, ConfigWatcher};
