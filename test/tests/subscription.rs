//! Tests for breakpoint callbacks.
//!
//! Callbacks fire when the viewport enters a breakpoint, either right away
//! on subscription or when a later resize crosses into the range.

use std::cell::Cell;
use std::rc::Rc;

use floem_breakpoints_test::prelude::*;

#[test]
fn test_immediate_call_when_matched() {
    let harness = ViewportHarness::with_standard_breakpoints(900.0);
    let tracker = CallTracker::new();

    harness.breakpoints().on("tablet", &tracker.callback());

    assert_eq!(
        tracker.calls(),
        vec![Call {
            name: "tablet".to_string(),
            from_event: false,
            matched: true,
        }]
    );
}

#[test]
fn test_immediate_then_transitions() {
    let harness = ViewportHarness::with_standard_breakpoints(900.0);
    let tracker = CallTracker::new();
    harness.breakpoints().on("tablet", &tracker.callback());

    harness.resize(1300.0);
    assert_eq!(tracker.count(), 1, "leaving the range is not reported");

    harness.resize(1000.0);
    assert_eq!(tracker.count(), 2);
    assert!(tracker.calls()[1].from_event);
    assert!(tracker.calls()[1].matched);
}

#[test]
fn test_deferred_subscription_skips_immediate_call() {
    let harness = ViewportHarness::with_standard_breakpoints(900.0);
    let tracker = CallTracker::new();

    harness.breakpoints().subscribe("tablet", &tracker.callback(), false);
    assert_eq!(tracker.count(), 0);

    harness.resize(500.0);
    assert_eq!(tracker.count(), 0);

    harness.resize(800.0);
    assert_eq!(tracker.names(), vec!["tablet"]);
}

#[test]
fn test_no_immediate_call_when_unmatched() {
    let harness = ViewportHarness::with_standard_breakpoints(500.0);
    let tracker = CallTracker::new();

    harness.breakpoints().on("desktop", &tracker.callback());
    assert_eq!(tracker.count(), 0);

    harness.resize(1200.0);
    assert_eq!(tracker.names(), vec!["desktop"]);
}

#[test]
fn test_resizing_within_range_does_not_fire() {
    let harness = ViewportHarness::with_standard_breakpoints(500.0);
    let tracker = CallTracker::new();
    harness.breakpoints().subscribe("tablet", &tracker.callback(), false);

    harness.resize(800.0);
    harness.resize(900.0);
    harness.resize(1100.0);
    assert_eq!(tracker.count(), 1);
}

#[test]
fn test_off_stops_delivery() {
    let harness = ViewportHarness::with_standard_breakpoints(500.0);
    let tracker = CallTracker::new();
    let callback = tracker.callback();
    harness.breakpoints().on("tablet", &callback);

    harness.resize(900.0);
    assert_eq!(tracker.count(), 1);

    harness.breakpoints().off("tablet", &callback);
    harness.resize(500.0);
    harness.resize(900.0);
    assert_eq!(tracker.count(), 1);

    let watcher = harness.breakpoints().get("tablet").unwrap();
    assert!(watcher.is_matched());
}

#[test]
fn test_off_only_detaches_that_callback() {
    let harness = ViewportHarness::with_standard_breakpoints(500.0);
    let kept = CallTracker::new();
    let removed = CallTracker::new();
    let removed_callback = removed.callback();

    harness.breakpoints().on("tablet", &kept.callback());
    harness.breakpoints().on("tablet", &removed_callback);
    harness.breakpoints().off("tablet", &removed_callback);
    // a callback that was never attached
    harness.breakpoints().off("tablet", &removed.callback());

    harness.resize(900.0);
    assert_eq!(kept.count(), 1);
    assert_eq!(removed.count(), 0);
}

#[test]
fn test_same_callback_on_several_breakpoints() {
    let harness = ViewportHarness::with_standard_breakpoints(500.0);
    let tracker = CallTracker::new();
    let callback = tracker.callback();

    harness.breakpoints().on("mobile", &callback);
    harness.breakpoints().on("tablet", &callback);
    harness.breakpoints().on("desktop", &callback);
    assert_eq!(tracker.names(), vec!["mobile"]);

    harness.resize(900.0);
    harness.resize(1500.0);
    harness.resize(400.0);
    assert_eq!(
        tracker.names(),
        vec!["mobile", "tablet", "desktop", "mobile"]
    );

    harness.breakpoints().off("tablet", &callback);
    harness.resize(900.0);
    assert_eq!(tracker.count(), 4);
}

#[test]
fn test_breakpoint_without_watcher_ignores_subscriptions() {
    let harness = ViewportHarness::new(900.0);
    harness.breakpoints().define([("all", BreakpointDefinition::new())]);
    let tracker = CallTracker::new();
    let callback = tracker.callback();

    harness.breakpoints().on("all", &callback);
    harness.breakpoints().off("all", &callback);
    harness.resize(100.0);
    harness.resize(3000.0);
    assert_eq!(tracker.count(), 0);
}

#[test]
fn test_unknown_breakpoint_ignores_subscriptions() {
    let harness = ViewportHarness::new(900.0);
    let tracker = CallTracker::new();

    harness.breakpoints().on("tablet", &tracker.callback());
    harness.breakpoints().define([("tablet", BreakpointDefinition::between(768, 1199))]);
    harness.resize(500.0);
    harness.resize(900.0);
    assert_eq!(tracker.count(), 0);
}

#[test]
fn test_redefinition_orphans_old_listeners() {
    let harness = ViewportHarness::with_standard_breakpoints(500.0);
    let tracker = CallTracker::new();
    let callback = tracker.callback();
    harness.breakpoints().on("tablet", &callback);

    harness.breakpoints().define([("tablet", BreakpointDefinition::between(600, 1023))]);
    assert_eq!(harness.breakpoints().orphaned(), 1);

    // 900 is inside both the old 768..=1199 range and the new one
    harness.resize(900.0);
    assert_eq!(tracker.count(), 1);
    let calls = tracker.calls();
    assert_eq!(calls[0].name, "tablet");
    assert!(calls[0].from_event);

    // the new record never had the callback, so it can't detach the old one
    harness.breakpoints().off("tablet", &callback);
    harness.resize(500.0);
    harness.resize(900.0);
    assert_eq!(tracker.count(), 2);

    // only the old range drives the orphaned callback
    harness.resize(650.0);
    harness.resize(500.0);
    harness.resize(1100.0);
    assert_eq!(tracker.count(), 3);
}

#[test]
fn test_callback_receives_event_and_record() {
    let harness = ViewportHarness::with_standard_breakpoints(500.0);
    let seen = Rc::new(Cell::new(false));
    let callback = BreakpointCallback::new({
        let seen = seen.clone();
        move |event, breakpoint| {
            let event = event.expect("called from a change event");
            assert!(event.matches);
            assert_eq!(event.media, "(min-width: 768px) and (max-width: 1199px)");
            assert_eq!(breakpoint.name(), "tablet");
            assert_eq!(
                breakpoint.media().map(|media| media.media()),
                Some(event.media.clone())
            );
            seen.set(true);
        }
    });
    harness.breakpoints().on("tablet", &callback);

    harness.resize(800.0);
    assert!(seen.get());
}

#[test]
fn test_callback_can_detach_itself() {
    let harness = ViewportHarness::with_standard_breakpoints(500.0);
    let count = Rc::new(Cell::new(0));
    let slot: Rc<Cell<Option<BreakpointCallback>>> = Rc::new(Cell::new(None));
    let callback = BreakpointCallback::new({
        let count = count.clone();
        let slot = slot.clone();
        let breakpoints = harness.breakpoints().clone();
        move |_, breakpoint| {
            count.set(count.get() + 1);
            if let Some(me) = slot.take() {
                breakpoints.off(breakpoint.name(), &me);
            }
        }
    });
    slot.set(Some(callback.clone()));
    harness.breakpoints().on("tablet", &callback);

    harness.resize(900.0);
    harness.resize(500.0);
    harness.resize(900.0);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_callback_can_subscribe_others() {
    let harness = ViewportHarness::with_standard_breakpoints(500.0);
    let tracker = CallTracker::new();
    let on_desktop = tracker.callback();
    let chain = BreakpointCallback::new({
        let breakpoints = harness.breakpoints().clone();
        move |_, _| breakpoints.on("desktop", &on_desktop)
    });
    harness.breakpoints().subscribe("tablet", &chain, false);

    harness.resize(900.0);
    assert_eq!(tracker.count(), 0);
    harness.resize(1300.0);
    assert_eq!(tracker.names(), vec!["desktop"]);
}
