// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration watcher trait definition.
//!
//! This module defines the `ConfigWatcher` trait, which provides an interface for
//! watching document sources for changes and reporting which category changed.

use crate::domain::{ConfigCategory, Result};
use std::sync::Arc;

/// Type alias for change notification callbacks.
///
/// This callback is invoked with the category whose source document changed.
pub type ChangeCallback = Arc<dyn Fn(ConfigCategory) + Send + Sync>;

/// A trait for watching document sources for changes.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Callbacks may run on a watcher-owned thread.
///
/// # Examples
///
/// ```rust
/// use vib34d_config::ports::{ChangeCallback, ConfigWatcher};
/// use vib34d_config::domain::Result;
///
/// struct NeverChanges;
///
/// impl ConfigWatcher for NeverChanges {
///     fn watch(&mut self, _callback: ChangeCallback) -> Result<()> {
///         Ok(())
///     }
///
///     fn stop(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait ConfigWatcher: Send + Sync {
    /// Starts watching for changes.
    ///
    /// The callback should return quickly; anything slow belongs on a task it spawns.
    fn watch(&mut self, callback: ChangeCallback) -> Result<()>;

    /// Stops watching. No callbacks are made after this returns.
    fn stop(&mut self) -> Result<()>;
}
