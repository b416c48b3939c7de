//! Tests for the per-thread registry and the free functions using it.
//!
//! Every test runs on its own thread and therefore starts without a
//! registry.

use floem_breakpoints::{self as breakpoints, BreakpointError};
use floem_breakpoints_test::prelude::*;
use serde_json::json;

#[test]
fn test_uninitialized_registry() {
    assert!(breakpoints::global().is_none());
    assert!(breakpoints::get("mobile").is_none());

    let tracker = CallTracker::new();
    breakpoints::on("mobile", &tracker.callback());
    breakpoints::define([("mobile", BreakpointDefinition::up_to(767))]);
    assert!(breakpoints::get("mobile").is_none());
    assert_eq!(tracker.count(), 0);
}

#[test]
fn test_init_is_guarded() {
    let installed = breakpoints::init(HeadlessViewport::default()).unwrap();
    let again = breakpoints::init(HeadlessViewport::default());
    assert!(matches!(again, Err(BreakpointError::AlreadyInitialized)));
    assert!(breakpoints::global().unwrap().ptr_eq(&installed));
}

#[test]
fn test_free_functions() {
    let viewport = HeadlessViewport::new(500.0);
    breakpoints::init(viewport.clone()).unwrap();

    assert!(breakpoints::get("tablet").is_none());
    breakpoints::define([
        ("mobile", BreakpointDefinition::up_to(767)),
        ("tablet", BreakpointDefinition::between(768, 1199)),
    ]);
    assert_eq!(
        breakpoints::get_field("tablet", BreakpointField::Min),
        Some(FieldValue::Min(768))
    );

    let tracker = CallTracker::new();
    let callback = tracker.callback();
    breakpoints::on("mobile", &callback);
    breakpoints::subscribe("tablet", &callback, false);
    assert_eq!(tracker.names(), vec!["mobile"]);

    viewport.set_width(900.0);
    assert_eq!(tracker.names(), vec!["mobile", "tablet"]);

    breakpoints::off("tablet", &callback);
    viewport.set_width(500.0);
    viewport.set_width(900.0);
    assert_eq!(tracker.names(), vec!["mobile", "tablet", "mobile"]);
}

#[test]
fn test_define_value() {
    let viewport = HeadlessViewport::new(1300.0);
    breakpoints::init(viewport).unwrap();

    breakpoints::define_value(&json!(["not", "an", "object"]));
    assert!(!breakpoints::global().unwrap().is_initialized());

    breakpoints::define_value(&json!({
        "desktop": { "min": 1200, "max": null },
        "all": {}
    }));
    let desktop = breakpoints::get("desktop").unwrap();
    assert_eq!(desktop.max(), MaxWidth::Unbounded);
    assert!(desktop.is_matched());
    assert!(breakpoints::get("all").unwrap().media().is_none());
}

#[test]
fn test_callback_reenters_thread_registry() {
    let viewport = HeadlessViewport::new(500.0);
    breakpoints::init(viewport.clone()).unwrap();
    breakpoints::define([("tablet", BreakpointDefinition::between(768, 1199))]);

    let callback = BreakpointCallback::new(|_, breakpoint| {
        // the registry is not borrowed while callbacks run
        breakpoints::define([(
            "seen",
            BreakpointDefinition::from_min(i32::try_from(breakpoint.min()).unwrap()),
        )]);
    });
    breakpoints::on("tablet", &callback);
    viewport.set_width(900.0);

    let seen = breakpoints::get("seen").unwrap();
    assert_eq!(seen.min(), 768);
    assert!(seen.is_matched());
}
