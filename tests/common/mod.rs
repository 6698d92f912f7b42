//! Test utilities for outlet navigation tests
//!
//! Provides fixtures, helpers, and assertion utilities shared by the
//! integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tab_navigator::*;

/// Route `RUST_LOG` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Outlet over an in-memory history with an empty navigation history.
pub fn empty_outlet() -> Outlet<MemoryHistory> {
    init_logging();
    Outlet::new(MemoryHistory::new("/"))
}

/// Outlet mounted at `path` inside `tab`.
pub fn outlet_in_tab(path: &str, tab: &str) -> Outlet<MemoryHistory> {
    init_logging();
    Outlet::builder(MemoryHistory::new(path))
        .initial_location(Location::parse(path))
        .initial_tab(tab)
        .build()
}

/// Push `path` forward and deliver the change notification.
pub fn push(outlet: &mut Outlet<MemoryHistory>, path: &str) -> RouteInfo {
    let result = outlet.navigate(path, RouteAction::Push, Some(RouteDirection::Forward), None, None);
    assert!(result.is_issued(), "push to '{}' was not issued: {:?}", path, result);
    outlet.sync();
    outlet.route_info().clone()
}

/// Go back and deliver the change notification.
pub fn back(outlet: &mut Outlet<MemoryHistory>) -> RouteInfo {
    outlet.navigate_back(None);
    outlet.sync();
    outlet.route_info().clone()
}

/// Switch tabs the way a tab bar does: change, deliver, then mark current.
pub fn switch_tab(outlet: &mut Outlet<MemoryHistory>, tab: &str, root: &str) -> RouteInfo {
    outlet.change_tab(tab, root, None);
    outlet.sync();
    outlet.set_current_tab(tab);
    outlet.route_info().clone()
}

/// Collects every route change an outlet broadcasts.
#[derive(Clone, Default)]
pub struct RouteRecorder {
    seen: Arc<Mutex<Vec<RouteInfo>>>,
}

impl RouteRecorder {
    pub fn attach(outlet: &Outlet<MemoryHistory>) -> (Self, Subscription) {
        let recorder = Self::default();
        let sink = Arc::clone(&recorder.seen);
        let subscription = outlet.on_route_change(move |info| {
            sink.lock().unwrap().push(info.clone());
        });
        (recorder, subscription)
    }

    pub fn pathnames(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|info| info.pathname.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<RouteInfo> {
        self.seen.lock().unwrap().last().cloned()
    }
}

/// Pathnames of every recorded history entry, oldest first.
pub fn history_paths(outlet: &Outlet<MemoryHistory>) -> Vec<String> {
    outlet
        .history()
        .entries()
        .iter()
        .map(|info| info.pathname.clone())
        .collect()
}
