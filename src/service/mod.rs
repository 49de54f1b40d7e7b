// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration system.
//!
//! This module contains `JsonConfigSystem`, the concrete implementation of the
//! `ConfigurationService` trait, together with its builder and the event publisher it
//! dispatches notifications through.

pub mod config_system;
pub mod publisher;

// Re-export commonly used types
#[cfg(feature = "reload")]
pub use config_system::spawn_reload_on_change;
pub use config_system::{ConfigSystemBuilder, JsonConfigSystem};
pub use publisher::EventPublisher;
