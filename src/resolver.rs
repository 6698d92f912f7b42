//! Transition resolution.
//!
//! The location emitter only knows a flat list of URLs and reports each
//! change as a push, replace or pop. [`resolve_transition`] turns one such
//! notification, plus the [`PendingIntent`] recorded when the navigation was
//! requested, into the next [`RouteInfo`]: which tab owns it, how it was
//! reached, and which ancestor a back navigation should restore.
//!
//! Resolution is pure with respect to history: it reads the
//! [`LocationHistory`] and returns a [`Resolution`], and the caller decides
//! what to store.
//!
//! # Rules
//!
//! 1. The entry being left is the *previous* entry when the navigation is a
//!    replace (by intent, or by raw action when there is no intent), and the
//!    *current* entry otherwise.
//! 2. If the leaving entry's URL (pathname + search) equals the new pathname,
//!    nothing is recorded.
//! 3. Without an intent, a raw REPLACE becomes replace/none and anything else
//!    becomes push/forward, owned by the outlet's current tab.
//! 4. A [`PendingIntent::Replay`] is recorded as-is (keeping its id) with the
//!    leaving pathname attached.
//! 5. Otherwise a fresh entry is built at the new location:
//!    - push + forward: inherits the leaving entry's tab and is pushed by the
//!      leaving pathname;
//!    - pop: takes the ancestor link of the entry it resolves back to;
//!    - push into a different tab: inherits the ancestor link of that tab's
//!      most recent entry.

use crate::history::LocationHistory;
use crate::ids::IdGenerator;
use crate::matching::RouteMatcher;
use crate::route_info::{
    HistoryAction, LocationChange, RouteAction, RouteDirection, RouteInfo, RouteOptions,
};
use crate::{debug_log, trace_log};

// ============================================================================
// Pending intents
// ============================================================================

/// Description of a navigation that was requested but not yet confirmed by
/// the emitter.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingIntent {
    /// A new entry should be created at whatever location the emitter
    /// reports.
    Navigate(NavigationIntent),
    /// A known entry is being returned to; it keeps its id.
    Replay(RouteInfo),
}

impl PendingIntent {
    /// The action the intent was issued with.
    pub fn route_action(&self) -> Option<RouteAction> {
        match self {
            PendingIntent::Navigate(intent) => Some(intent.route_action),
            PendingIntent::Replay(info) => info.route_action,
        }
    }

    /// The direction the intent was issued with.
    pub fn route_direction(&self) -> Option<RouteDirection> {
        match self {
            PendingIntent::Navigate(intent) => Some(intent.route_direction),
            PendingIntent::Replay(info) => info.route_direction,
        }
    }

    /// Return `true` if the intent replays a known entry.
    pub fn is_replay(&self) -> bool {
        matches!(self, PendingIntent::Replay(_))
    }
}

/// Fields a fresh navigation contributes to the entry it creates.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationIntent {
    pub route_action: RouteAction,
    pub route_direction: RouteDirection,
    pub route_options: Option<RouteOptions>,
    pub tab: Option<String>,
}

impl NavigationIntent {
    /// Create an intent with no options and no tab.
    pub fn new(route_action: RouteAction, route_direction: RouteDirection) -> Self {
        Self {
            route_action,
            route_direction,
            route_options: None,
            tab: None,
        }
    }

    /// Intent for a change nobody asked the outlet for (browser buttons,
    /// links handled by the outer router).
    fn implied_by(action: HistoryAction, current_tab: Option<&str>) -> Self {
        let (route_action, route_direction) = match action {
            HistoryAction::Replace => (RouteAction::Replace, RouteDirection::None),
            HistoryAction::Push | HistoryAction::Pop => (RouteAction::Push, RouteDirection::Forward),
        };
        Self {
            tab: current_tab.map(str::to_string),
            ..Self::new(route_action, route_direction)
        }
    }

    fn is_forward_push(&self) -> bool {
        self.route_action == RouteAction::Push && self.route_direction == RouteDirection::Forward
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// What a location change means for history.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The change does not move away from the leaving entry.
    Unchanged,
    /// A new entry to append.
    Record(RouteInfo),
}

/// Everything the resolver reads or draws from besides the change itself.
pub struct ResolveContext<'a> {
    pub history: &'a LocationHistory,
    pub current_tab: Option<&'a str>,
    pub ids: &'a mut dyn IdGenerator,
    pub matcher: &'a mut dyn RouteMatcher,
    pub id_prefix: &'a str,
}

/// Resolve one raw location change into the next history entry.
///
/// # Example
///
/// ```
/// use tab_navigator::ids::SequentialIds;
/// use tab_navigator::matching::NoParams;
/// use tab_navigator::resolver::{resolve_transition, ResolveContext, Resolution};
/// use tab_navigator::{HistoryAction, Location, LocationChange, LocationHistory, RouteInfo};
///
/// let mut history = LocationHistory::new();
/// history.add(RouteInfo::new("list", &Location::parse("/list")).with_tab("t1"));
///
/// let change = LocationChange::new(Location::parse("/detail"), HistoryAction::Push);
/// let resolution = resolve_transition(
///     ResolveContext {
///         history: &history,
///         current_tab: Some("t1"),
///         ids: &mut SequentialIds,
///         matcher: &mut NoParams,
///         id_prefix: "routeInfo",
///     },
///     &change,
///     None,
/// );
///
/// let Resolution::Record(next) = resolution else { panic!("expected a new entry") };
/// assert_eq!(next.tab.as_deref(), Some("t1"));
/// assert_eq!(next.pushed_by_route.as_deref(), Some("/list"));
/// ```
pub fn resolve_transition(
    mut cx: ResolveContext<'_>,
    change: &LocationChange,
    intent: Option<PendingIntent>,
) -> Resolution {
    let history = cx.history;
    let leaving_on_previous = match &intent {
        Some(intent) => intent.route_action() == Some(RouteAction::Replace),
        None => change.action == HistoryAction::Replace,
    };
    let leaving = if leaving_on_previous {
        history.previous()
    } else {
        history.current()
    };

    let leaving_url = leaving.url();
    if leaving_url == change.location.pathname {
        debug_log!(
            "Location '{}' does not leave '{}'; nothing recorded",
            change.location,
            leaving_url
        );
        return Resolution::Unchanged;
    }
    trace_log!(
        "Leaving '{}' (id: {}) for '{}' via {:?}",
        leaving_url,
        leaving.id,
        change.location,
        change.action
    );

    let intent = intent.unwrap_or_else(|| {
        PendingIntent::Navigate(NavigationIntent::implied_by(change.action, cx.current_tab))
    });

    let intent = match intent {
        PendingIntent::Replay(info) => {
            debug_log!(
                "Replaying entry {} at '{}' ({:?}/{:?})",
                info.id,
                info.url(),
                info.route_action,
                info.route_direction
            );
            return Resolution::Record(RouteInfo {
                last_pathname: non_empty(&leaving.pathname),
                ..info
            });
        }
        PendingIntent::Navigate(intent) => intent,
    };

    let is_pushed = intent.is_forward_push();
    let mut next = RouteInfo {
        id: cx.ids.generate_id(cx.id_prefix),
        pathname: change.location.pathname.clone(),
        search: change.location.search.clone(),
        tab: intent.tab,
        route_action: Some(intent.route_action),
        route_direction: Some(intent.route_direction),
        last_pathname: non_empty(&leaving.pathname),
        pushed_by_route: None,
        params: cx.matcher.match_params(&change.location.pathname),
        route_options: intent.route_options,
    };

    if is_pushed {
        next.tab = leaving.tab.clone();
        next.pushed_by_route = non_empty(&leaving.pathname);
    } else if intent.route_action == RouteAction::Pop {
        next.pushed_by_route = history
            .find_last_location(&next)
            .and_then(|ancestor| ancestor.pushed_by_route.clone());
    } else if intent.route_action == RouteAction::Push && next.tab != leaving.tab {
        next.pushed_by_route = history
            .latest_with_tab(next.tab.as_deref())
            .and_then(|last| last.pushed_by_route.clone());
    }

    debug_log!(
        "New entry {} at '{}' ({}/{}, tab: {:?}, pushed by: {:?})",
        next.id,
        next.url(),
        intent.route_action,
        intent.route_direction,
        next.tab,
        next.pushed_by_route
    );
    Resolution::Record(next)
}

fn non_empty(pathname: &str) -> Option<String> {
    (!pathname.is_empty()).then(|| pathname.to_string())
}
