// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for event delivery.

mod common;

use common::{all_event_names, full_source, record_events, system_with};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vib34d_config::prelude::*;

#[tokio::test]
async fn test_aggregate_event_fires_last_and_once() {
    let system = system_with(Arc::new(full_source()));
    let log = record_events(&system, all_event_names());

    system.load_all().await.unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 5);
    assert_eq!(log.last().map(String::as_str), Some("configLoaded"));

    let mut per_category: Vec<&str> = log[..4].iter().map(String::as_str).collect();
    per_category.sort_unstable();
    assert_eq!(
        per_category,
        vec![
            "behaviorConfigLoaded",
            "layoutConfigLoaded",
            "stateMapConfigLoaded",
            "visualsConfigLoaded",
        ]
    );
}

#[tokio::test]
async fn test_aggregate_event_carries_complete_snapshot() {
    let system = system_with(Arc::new(full_source()));
    let seen = Arc::new(Mutex::new(None));
    let seen_clone = Arc::clone(&seen);

    system.subscribe(EventName::AllLoaded, move |event| {
        *seen_clone.lock().unwrap() = event.snapshot().cloned();
        Ok(())
    });

    let returned = system.load_all().await.unwrap();

    let seen = seen.lock().unwrap();
    let snapshot = seen.as_ref().expect("configLoaded was not delivered");
    assert!(snapshot.is_complete());
    assert_eq!(snapshot, &returned);
}

#[tokio::test]
async fn test_no_aggregate_event_on_partial_failure() {
    let source = Arc::new(full_source());
    source.remove("layout-content.json");
    let system = system_with(source);
    let log = record_events(&system, all_event_names());

    assert!(system.load_all().await.is_err());

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 3);
    assert!(!log.iter().any(|name| name == "configLoaded"));
    assert!(!log.iter().any(|name| name == "layoutConfigLoaded"));
}

#[tokio::test]
async fn test_double_load_fires_twice() {
    let system = system_with(Arc::new(full_source()));
    let log = record_events(&system, [EventName::Loaded(ConfigCategory::Behavior)]);

    system.load(ConfigCategory::Behavior).await.unwrap();
    system.load(ConfigCategory::Behavior).await.unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["behaviorConfigLoaded", "behaviorConfigLoaded"]
    );
}

#[tokio::test]
async fn test_loaded_payload_is_stored_document() {
    let system = system_with(Arc::new(full_source()));
    let payload = Arc::new(Mutex::new(None));
    let payload_clone = Arc::clone(&payload);

    system.subscribe(EventName::Loaded(ConfigCategory::Visuals), move |event| {
        *payload_clone.lock().unwrap() = event.document().cloned();
        Ok(())
    });

    let loaded = system.load(ConfigCategory::Visuals).await.unwrap();

    let payload = payload.lock().unwrap();
    assert!(ConfigDocument::ptr_eq(payload.as_ref().unwrap(), &loaded));
}

#[test]
fn test_updated_event_is_distinct_from_loaded() {
    let system = system_with(Arc::new(InMemorySource::new()));
    let log = record_events(&system, all_event_names());

    system
        .update(
            ConfigCategory::StateMap,
            json!({"states": {}, "initialState": "home"}),
        )
        .unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["stateMapConfigUpdated"]);
}

#[test]
fn test_rejected_update_fires_nothing() {
    let system = system_with(Arc::new(InMemorySource::new()));
    let log = record_events(&system, all_event_names());

    assert!(system
        .update(ConfigCategory::Layout, json!({"layout": {}}))
        .is_err());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let system = system_with(Arc::new(InMemorySource::new()));
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = Arc::clone(&count);
    let event = EventName::Updated(ConfigCategory::Behavior);

    let id = system.subscribe(event, move |_| {
        count_clone.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let doc = json!({"interactionBlueprints": {}});
    system.update(ConfigCategory::Behavior, doc.clone()).unwrap();
    assert!(system.unsubscribe(event, id));
    system.update(ConfigCategory::Behavior, doc).unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!system.unsubscribe(event, id));
}

#[tokio::test]
async fn test_failing_listener_surfaces_after_store() {
    let system = system_with(Arc::new(full_source()));
    let log = record_events(&system, [EventName::Loaded(ConfigCategory::Layout)]);
    system.subscribe(EventName::Loaded(ConfigCategory::Layout), |_| {
        Err("canvas not mounted".into())
    });
    let after = record_events(&system, [EventName::Loaded(ConfigCategory::Layout)]);

    let err = system.load(ConfigCategory::Layout).await.unwrap_err();

    match err {
        ConfigError::ListenerError { event, failures } => {
            assert_eq!(event, "layoutConfigLoaded");
            assert_eq!(failures, vec!["canvas not mounted".to_string()]);
        }
        other => panic!("expected ListenerError, got {:?}", other),
    }
    assert_eq!(log.lock().unwrap().len(), 1);
    assert_eq!(after.lock().unwrap().len(), 1);
    assert!(system.has_config(ConfigCategory::Layout));
}

#[tokio::test]
async fn test_failing_listener_fails_load_all() {
    let system = system_with(Arc::new(full_source()));
    let log = record_events(&system, [EventName::AllLoaded]);
    system.subscribe(EventName::Loaded(ConfigCategory::StateMap), |_| {
        panic!("state machine exploded")
    });

    let err = system.load_all().await.unwrap_err();

    assert!(matches!(err, ConfigError::ListenerError { .. }));
    assert!(system.is_fully_loaded());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_subscribe_by_name() {
    let system = system_with(Arc::new(InMemorySource::new()));
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = Arc::clone(&count);

    system
        .subscribe_named("layoutConfigUpdated", move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

    system
        .update(
            ConfigCategory::Layout,
            json!({"layout": {}, "components": {}, "cards": []}),
        )
        .unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);

    let err = system.subscribe_named("layoutChanged", |_| Ok(())).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownEvent { .. }));
}

#[test]
fn test_systems_do_not_share_listeners() {
    let first = system_with(Arc::new(InMemorySource::new()));
    let second = system_with(Arc::new(InMemorySource::new()));
    let log = record_events(&first, all_event_names());

    second
        .update(ConfigCategory::Behavior, json!({"interactionBlueprints": {}}))
        .unwrap();

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(second.events().listener_count(EventName::AllLoaded), 0);
}
