// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event listener types.

use crate::domain::ConfigEvent;
use std::sync::Arc;

/// The error a listener reports when it cannot handle an event.
pub type ListenerFailure = Box<dyn std::error::Error + Send + Sync>;

/// A subscriber to configuration events.
///
/// Listeners are called synchronously on the thread that published the event. A
/// listener that returns `Err` or panics does not stop delivery to later listeners.
pub type ConfigListener =
    Arc<dyn Fn(&ConfigEvent) -> std::result::Result<(), ListenerFailure> + Send + Sync>;

/// Identifies one registration, for unsubscribing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl SubscriptionId {
    /// Returns the raw registration number.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}
