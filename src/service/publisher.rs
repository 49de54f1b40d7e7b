// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synchronous, ordered event fan-out.
//!
//! Each configuration system owns one `EventPublisher`; there is no process-wide bus.

use crate::domain::{ConfigError, ConfigEvent, EventName, Result};
use crate::ports::{ConfigListener, ListenerFailure, SubscriptionId};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

type Registrations = Vec<(SubscriptionId, ConfigListener)>;

/// Registry of listeners keyed by event name.
///
/// Delivery happens on the emitting thread, to every listener registered for the
/// exact event name, in registration order, before `emit` returns. The registry is
/// not locked while listeners run, so a listener may subscribe or unsubscribe other
/// listeners; such changes take effect from the next emission.
///
/// # Examples
///
/// ```rust
/// use vib34d_config::domain::{ConfigCategory, ConfigDocument, ConfigEvent, EventName};
/// use vib34d_config::service::EventPublisher;
/// use serde_json::json;
/// use std::sync::{Arc, Mutex};
///
/// let publisher = EventPublisher::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let seen_clone = Arc::clone(&seen);
///
/// publisher.subscribe_fn(EventName::Updated(ConfigCategory::Layout), move |event| {
///     seen_clone.lock().unwrap().push(event.name.to_string());
///     Ok(())
/// });
///
/// let doc = ConfigDocument::new(json!({"layout": {}, "components": {}, "cards": []}));
/// publisher.emit(&ConfigEvent::updated(ConfigCategory::Layout, doc)).unwrap();
/// assert_eq!(*seen.lock().unwrap(), vec!["layoutConfigUpdated".to_string()]);
/// ```
#[derive(Default)]
pub struct EventPublisher {
    listeners: RwLock<HashMap<EventName, Registrations>>,
    next_id: AtomicU64,
}

impl EventPublisher {
    /// Creates a publisher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for one event name.
    ///
    /// Registering the same listener twice delivers the event to it twice.
    pub fn subscribe(&self, event: EventName, listener: ConfigListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event)
            .or_default()
            .push((id, listener));
        tracing::debug!("Subscribed listener {} to {}", id.as_u64(), event);
        id
    }

    /// Registers a closure as a listener for one event name.
    pub fn subscribe_fn<F>(&self, event: EventName, listener: F) -> SubscriptionId
    where
        F: Fn(&ConfigEvent) -> std::result::Result<(), ListenerFailure> + Send + Sync + 'static,
    {
        self.subscribe(event, std::sync::Arc::new(listener))
    }

    /// Removes a registration.
    ///
    /// Returns `false` if no listener with that id is registered for the event.
    pub fn unsubscribe(&self, event: EventName, id: SubscriptionId) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(registrations) = listeners.get_mut(&event) else {
            return false;
        };
        let before = registrations.len();
        registrations.retain(|(registered, _)| *registered != id);
        let removed = registrations.len() != before;
        if registrations.is_empty() {
            listeners.remove(&event);
        }
        if removed {
            tracing::debug!("Unsubscribed listener {} from {}", id.as_u64(), event);
        }
        removed
    }

    /// Returns the number of listeners registered for an event name.
    pub fn listener_count(&self, event: EventName) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&event)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Delivers an event to every listener registered for its name.
    ///
    /// A listener that returns `Err` or panics is logged and skipped; delivery
    /// continues with the next one. Once every listener has been attempted, the
    /// failures are returned together as `ConfigError::ListenerError`.
    pub fn emit(&self, event: &ConfigEvent) -> Result<()> {
        let registrations: Registrations = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&event.name)
            .cloned()
            .unwrap_or_default();

        let mut failures = Vec::new();
        for (id, listener) in registrations {
            let message = match panic::catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                Err(payload) => panic_message(payload.as_ref()),
            };
            tracing::error!(
                "Listener {} failed handling {}: {}",
                id.as_u64(),
                event.name,
                message
            );
            failures.push(message);
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ListenerError {
                event: event.name.to_string(),
                failures,
            })
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("listener panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("listener panicked: {}", s)
    } else {
        "listener panicked".to_string()
    }
}

impl std::fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let counts: HashMap<String, usize> = listeners
            .iter()
            .map(|(name, registrations)| (name.to_string(), registrations.len()))
            .collect();
        f.debug_struct("EventPublisher")
            .field("listeners", &counts)
            .finish()
    }
}
