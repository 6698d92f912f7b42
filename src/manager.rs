//! Route manager capability handle.
//!
//! Views and stack managers below an outlet need to hear about route changes
//! and to ask sibling stacks to tear views down, but they must not drive the
//! outlet's state machine. [`RouteManager`] is the slice of the outlet they
//! get: cloneable, shareable across threads, and limited to subscriptions and
//! the exit-view broadcast.

use crate::debug_log;
use crate::route_info::RouteInfo;
use crate::subscribers::{Subscribers, Subscription};

/// Subscription and broadcast hooks shared by an outlet and its descendants.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use tab_navigator::RouteManager;
///
/// let manager = RouteManager::new();
/// let exited = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&exited);
/// let subscription = manager.on_exit_view_from_other_outlet(move |pathname| {
///     sink.lock().unwrap().push(pathname.to_string());
/// });
///
/// manager.exit_view_from_other_outlet("/tabs/home/detail");
/// subscription.unsubscribe();
/// manager.exit_view_from_other_outlet("/tabs/home");
///
/// assert_eq!(*exited.lock().unwrap(), vec!["/tabs/home/detail"]);
/// ```
#[derive(Debug, Clone)]
pub struct RouteManager {
    route_changed: Subscribers<RouteInfo>,
    exit_view: Subscribers<str>,
}

impl RouteManager {
    /// Create a manager with no subscribers.
    pub fn new() -> Self {
        Self {
            route_changed: Subscribers::new("route-change"),
            exit_view: Subscribers::new("exit-view"),
        }
    }

    /// Register a callback run after every location change the outlet
    /// processes, with the resulting current entry.
    pub fn on_route_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&RouteInfo) + Send + Sync + 'static,
    {
        self.route_changed.subscribe(callback)
    }

    /// Register a callback asked to tear down the view at a pathname.
    pub fn on_exit_view_from_other_outlet<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.exit_view.subscribe(callback)
    }

    /// Ask every registered stack to tear down the view at `pathname`.
    pub fn exit_view_from_other_outlet(&self, pathname: &str) {
        debug_log!("Exit view broadcast for '{}'", pathname);
        self.exit_view.broadcast(pathname);
    }

    /// Return the number of route-change subscribers.
    pub fn route_change_subscribers(&self) -> usize {
        self.route_changed.len()
    }

    pub(crate) fn notify_route_change(&self, route_info: &RouteInfo) -> usize {
        self.route_changed.broadcast(route_info)
    }
}

impl Default for RouteManager {
    fn default() -> Self {
        Self::new()
    }
}
