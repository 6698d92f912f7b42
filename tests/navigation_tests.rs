//! Integration tests for push / back navigation through an outlet
//!
//! Covers the ancestor chain built by forward pushes, back navigation
//! through it, the empty-history start, and changes that arrive without an
//! outlet-issued intent.

mod common;

use common::*;
use tab_navigator::matching::RouteTable;
use tab_navigator::*;

#[test]
fn test_first_push_on_empty_history() {
    let mut outlet = empty_outlet();
    outlet.navigate("/home", RouteAction::Push, Some(RouteDirection::Forward), None, None);
    assert!(outlet.history().is_empty(), "history changes only on confirmation");

    let change = outlet.emitter_mut().poll_change().unwrap();
    assert_eq!(change.action, HistoryAction::Push);
    assert!(outlet.handle_location_change(change));

    let current = outlet.route_info();
    assert_eq!(current.pathname, "/home");
    assert_eq!(current.route_action, Some(RouteAction::Push));
    assert_eq!(current.route_direction, Some(RouteDirection::Forward));
    assert_eq!(current.pushed_by_route, None);
}

#[test]
fn test_forward_push_inherits_tab_and_ancestor() {
    let mut outlet = outlet_in_tab("/list", "t1");
    let detail = push(&mut outlet, "/detail");

    assert_eq!(detail.tab.as_deref(), Some("t1"));
    assert_eq!(detail.pushed_by_route.as_deref(), Some("/list"));
    assert_eq!(detail.last_pathname.as_deref(), Some("/list"));
}

#[test]
fn test_push_chain_links_each_entry_to_its_predecessor() {
    let mut outlet = outlet_in_tab("/0", "t1");
    for n in 1..=5 {
        push(&mut outlet, &format!("/{n}"));
    }

    let entries = outlet.history().entries();
    for pair in entries.windows(2) {
        assert_eq!(pair[1].pushed_by_route.as_deref(), Some(pair[0].pathname.as_str()));
    }

    // Back walks the chain one step at a time until it is exhausted.
    for n in (0..5).rev() {
        let current = back(&mut outlet);
        assert_eq!(current.pathname, format!("/{n}"));
        assert_eq!(current.route_action, Some(RouteAction::Pop));
    }
    let result = outlet.navigate_back(None);
    assert!(result.is_fallback());
    assert_eq!(result.url(), Some("/"));
}

#[test]
fn test_back_replaces_and_reuses_ancestor_id() {
    let mut outlet = outlet_in_tab("/list", "t1");
    let list_id = outlet.route_info().id.clone();
    push(&mut outlet, "/detail");
    let linear_len = outlet.emitter().entries().len();

    let result = outlet.navigate_back(None);
    assert_eq!(
        result,
        NavigationResult::Issued {
            url: "/list".to_string(),
            action: RouteAction::Replace
        }
    );
    assert_eq!(outlet.emitter().entries().len(), linear_len);
    match outlet.pending_intent() {
        Some(PendingIntent::Replay(info)) => {
            assert_eq!(info.id, list_id);
            assert_eq!(info.route_action, Some(RouteAction::Pop));
            assert_eq!(info.route_direction, Some(RouteDirection::Back));
        }
        other => panic!("expected a replay intent, got {:?}", other),
    }

    let change = outlet.emitter_mut().poll_change().unwrap();
    assert_eq!(change, LocationChange::new(Location::parse("/list"), HistoryAction::Replace));
    outlet.handle_location_change(change);

    let current = outlet.route_info();
    assert_eq!(current.id, list_id);
    assert_eq!(current.route_action, Some(RouteAction::Pop));
    assert_eq!(current.last_pathname.as_deref(), Some("/detail"));
}

#[test]
fn test_history_only_grows() {
    let mut outlet = outlet_in_tab("/start", "t1");
    push(&mut outlet, "/a");
    let restored = back(&mut outlet);

    assert_eq!(restored.pathname, "/start");
    assert_eq!(history_paths(&outlet), vec!["/start", "/a", "/start"]);
}

#[test]
fn test_back_without_ancestor_falls_back() {
    let mut outlet = outlet_in_tab("/root", "t1");
    let result = outlet.navigate_back(Some("/home"));
    assert_eq!(
        result,
        NavigationResult::FellBack {
            url: "/home".to_string()
        }
    );
    outlet.sync();

    let current = outlet.route_info();
    assert_eq!(current.pathname, "/home");
    assert_eq!(current.route_action, Some(RouteAction::Pop));
    assert_eq!(current.route_direction, Some(RouteDirection::Back));
    assert_eq!(current.pushed_by_route, None);
}

#[test]
fn test_back_uses_configured_default_path() {
    let mut outlet = Outlet::builder(MemoryHistory::new("/"))
        .config(OutletConfig::default().with_default_back_path("/tabs/home"))
        .build();
    let result = outlet.navigate_back(None);
    assert_eq!(result.url(), Some("/tabs/home"));
}

#[test]
fn test_back_from_unlinked_external_entry_falls_back() {
    let mut outlet = empty_outlet();
    outlet.handle_location_change(LocationChange::new(Location::parse("/orphan"), HistoryAction::Push));
    assert_eq!(outlet.route_info().pushed_by_route, None);

    let result = outlet.navigate_back(None);
    assert!(result.is_fallback());
    assert_eq!(result.url(), Some("/"));
}

#[test]
fn test_replace_intent_leaves_from_previous_entry() {
    let mut outlet = outlet_in_tab("/a", "t1");
    push(&mut outlet, "/b");

    let result = outlet.navigate("/c", RouteAction::Replace, None, None, None);
    assert_eq!(
        result,
        NavigationResult::Issued {
            url: "/c".to_string(),
            action: RouteAction::Replace
        }
    );
    assert_eq!(outlet.sync(), 1);

    let current = outlet.route_info();
    assert_eq!(current.pathname, "/c");
    assert_eq!(current.last_pathname.as_deref(), Some("/a"));
    assert_eq!(current.route_action, Some(RouteAction::Replace));
    assert_eq!(current.route_direction, Some(RouteDirection::None));
    assert_eq!(current.pushed_by_route, None);
    assert_eq!(current.tab, None);
    assert_eq!(history_paths(&outlet), vec!["/a", "/b", "/c"]);
}

#[test]
fn test_replace_intent_onto_previous_url_records_nothing() {
    let mut outlet = outlet_in_tab("/a", "t1");
    push(&mut outlet, "/b");

    outlet.navigate("/a", RouteAction::Replace, None, None, None);
    outlet.sync();

    assert_eq!(history_paths(&outlet), vec!["/a", "/b"]);
    assert!(outlet.pending_intent().is_none());
    assert_eq!(outlet.current_pathname(), Some("/a"));
}

#[test]
fn test_search_change_is_recorded_when_leaving_url_has_search() {
    let mut outlet = outlet_in_tab("/x?a=1", "t1");
    let recorded =
        outlet.handle_location_change(LocationChange::new(Location::parse("/x?a=2"), HistoryAction::Push));

    assert!(recorded);
    assert_eq!(outlet.history().len(), 2);
    assert_eq!(outlet.route_info().search, "?a=2");
}

#[test]
fn test_search_added_to_plain_path_is_not_recorded() {
    let mut outlet = outlet_in_tab("/x", "t1");
    let recorded =
        outlet.handle_location_change(LocationChange::new(Location::parse("/x?a=2"), HistoryAction::Push));

    assert!(!recorded);
    assert_eq!(outlet.history().len(), 1);
    assert_eq!(outlet.current_pathname(), Some("/x"));
}

#[test]
fn test_browser_back_button_is_treated_as_forward_push() {
    let mut outlet = outlet_in_tab("/a", "t1");
    push(&mut outlet, "/b");

    assert!(outlet.emitter_mut().go_back());
    outlet.sync();

    let current = outlet.route_info();
    assert_eq!(current.pathname, "/a");
    assert_eq!(current.route_action, Some(RouteAction::Push));
    assert_eq!(current.route_direction, Some(RouteDirection::Forward));
    assert_eq!(current.pushed_by_route.as_deref(), Some("/b"));
    assert_eq!(current.tab.as_deref(), Some("t1"));
}

#[test]
fn test_external_replace_takes_current_tab() {
    let mut outlet = outlet_in_tab("/a", "t1");
    push(&mut outlet, "/b");
    outlet.emitter_mut().replace("/c").unwrap();
    outlet.sync();

    let current = outlet.route_info();
    assert_eq!(current.pathname, "/c");
    assert_eq!(current.route_action, Some(RouteAction::Replace));
    assert_eq!(current.route_direction, Some(RouteDirection::None));
    assert_eq!(current.tab.as_deref(), Some("t1"));
    assert_eq!(current.last_pathname.as_deref(), Some("/a"));
}

#[test]
fn test_rejected_navigation_leaves_stale_intent() {
    let mut outlet = outlet_in_tab("/a", "t1");
    outlet.emitter_mut().set_blocked(Some("unsaved changes"));

    let result = outlet.navigate("/b", RouteAction::Push, None, None, None);
    assert!(matches!(
        result.error(),
        Some(NavigationError::EmitterRejected { url, .. }) if url == "/b"
    ));
    assert!(outlet.pending_intent().is_some());
    assert_eq!(outlet.history().len(), 1);

    // The next request overwrites the stale intent.
    outlet.emitter_mut().set_blocked(None);
    outlet.navigate("/c", RouteAction::Replace, None, None, None);
    assert_eq!(
        outlet.pending_intent().and_then(|i| i.route_action()),
        Some(RouteAction::Replace)
    );
}

#[test]
fn test_route_options_travel_with_the_entry() {
    let mut outlet = outlet_in_tab("/a", "t1");
    let options = RouteOptions::new(String::from("slide"));
    outlet.navigate("/b", RouteAction::Push, None, Some(options.clone()), None);
    outlet.sync();

    let stored = outlet.route_info().route_options.clone().unwrap();
    assert_eq!(stored, options);
    assert_eq!(stored.downcast_ref::<String>().map(String::as_str), Some("slide"));
}

#[test]
fn test_params_are_matched_for_new_entries() {
    let mut outlet = Outlet::builder(MemoryHistory::new("/"))
        .matcher(RouteTable::new().route("/users/:id").unwrap())
        .build();
    outlet.navigate("/users/42?tab=posts", RouteAction::Push, None, None, None);
    outlet.sync();

    let current = outlet.route_info();
    assert_eq!(current.params.get_as::<u32>("id"), Some(42));
    assert_eq!(current.query().get("tab"), Some(&"posts".to_string()));
}
