//! Integration tests for route-change and exit-view subscriptions

mod common;

use common::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use tab_navigator::*;

#[test]
fn test_subscribers_receive_each_processed_change() {
    let mut outlet = outlet_in_tab("/a", "t1");
    let (recorder, _subscription) = RouteRecorder::attach(&outlet);

    push(&mut outlet, "/b");
    push(&mut outlet, "/c");
    back(&mut outlet);

    assert_eq!(recorder.pathnames(), vec!["/b", "/c", "/b"]);
    assert_eq!(recorder.last().as_ref(), Some(outlet.route_info()));
}

#[test]
fn test_subscribers_hear_changes_that_record_nothing() {
    let mut outlet = outlet_in_tab("/a", "t1");
    let (recorder, _subscription) = RouteRecorder::attach(&outlet);

    let recorded =
        outlet.handle_location_change(LocationChange::new(Location::parse("/a"), HistoryAction::Push));
    assert!(!recorded);
    assert_eq!(recorder.pathnames(), vec!["/a"]);
}

#[test]
fn test_panicking_subscriber_does_not_block_others() {
    let mut outlet = outlet_in_tab("/a", "t1");
    let _faulty = outlet.on_route_change(|info| {
        if info.pathname == "/b" {
            panic!("view failed to mount");
        }
    });
    let (recorder, _subscription) = RouteRecorder::attach(&outlet);

    push(&mut outlet, "/b");
    push(&mut outlet, "/c");

    assert_eq!(recorder.pathnames(), vec!["/b", "/c"]);
    assert_eq!(outlet.route_info().pathname, "/c");
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let mut outlet = outlet_in_tab("/a", "t1");
    let (recorder, subscription) = RouteRecorder::attach(&outlet);

    push(&mut outlet, "/b");
    subscription.unsubscribe();
    push(&mut outlet, "/c");

    assert_eq!(recorder.pathnames(), vec!["/b"]);
    assert_eq!(outlet.route_manager().route_change_subscribers(), 0);
}

#[test]
fn test_dropping_subscription_keeps_callback() {
    let mut outlet = outlet_in_tab("/a", "t1");
    let (recorder, subscription) = RouteRecorder::attach(&outlet);
    drop(subscription);

    push(&mut outlet, "/b");
    assert_eq!(recorder.len(), 1);
}

#[test]
fn test_nothing_parked_while_subscribed() {
    let mut outlet = outlet_in_tab("/a", "t1");
    let (_recorder, subscription) = RouteRecorder::attach(&outlet);

    push(&mut outlet, "/b");
    assert!(outlet.take_pending_route_change().is_none());

    subscription.unsubscribe();
    push(&mut outlet, "/c");
    push(&mut outlet, "/d");
    assert_eq!(
        outlet.take_pending_route_change().map(|info| info.pathname),
        Some("/d".to_string())
    );
}

#[test]
fn test_exit_view_reaches_every_stack() {
    let outlet = outlet_in_tab("/tabs/home", "home");
    let exited = Arc::new(Mutex::new(Vec::new()));

    let mut subscriptions = Vec::new();
    for stack in ["home", "settings"] {
        let sink = Arc::clone(&exited);
        subscriptions.push(outlet.on_exit_view_from_other_outlet(move |pathname| {
            sink.lock().unwrap().push(format!("{stack}:{pathname}"));
        }));
    }

    outlet.route_manager().exit_view_from_other_outlet("/tabs/home/a");
    assert_eq!(
        *exited.lock().unwrap(),
        vec!["home:/tabs/home/a", "settings:/tabs/home/a"]
    );
}

#[test]
fn test_route_manager_is_shareable_across_threads() {
    let outlet = outlet_in_tab("/a", "t1");
    let count = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&count);
    let _subscription = outlet.on_exit_view_from_other_outlet(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let manager = outlet.route_manager();
            thread::spawn(move || manager.exit_view_from_other_outlet(&format!("/view/{n}")))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(count.load(Ordering::SeqCst), 4);
}
