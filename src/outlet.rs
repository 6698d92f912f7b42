//! Navigation façade.
//!
//! An [`Outlet`] is one navigation root. It owns the [`LocationHistory`], the
//! tab it currently shows, and the single pending-intent slot, and it talks to
//! the outer routing layer through a [`LocationEmitter`].
//!
//! Navigation is a two-step exchange:
//!
//! 1. A façade operation ([`navigate`](Outlet::navigate),
//!    [`navigate_back`](Outlet::navigate_back),
//!    [`change_tab`](Outlet::change_tab), [`reset_tab`](Outlet::reset_tab))
//!    records a [`PendingIntent`] and issues a raw push or replace. History is
//!    not touched.
//! 2. The emitter's change notification arrives through
//!    [`handle_location_change`](Outlet::handle_location_change) (or
//!    [`sync`](Outlet::sync) for polled emitters). The resolver consumes the
//!    intent, the new entry is stored, and route-change subscribers run.
//!
//! A second request made before the first is confirmed overwrites the
//! pending intent. An intent whose navigation is never confirmed stays
//! recorded until the next request replaces it.
//!
//! # Example
//!
//! ```
//! use tab_navigator::emitter::MemoryHistory;
//! use tab_navigator::{Outlet, RouteAction};
//!
//! let mut outlet = Outlet::new(MemoryHistory::new("/"));
//! outlet.set_current_tab("home");
//!
//! outlet.navigate("/list", RouteAction::Push, None, None, None);
//! outlet.sync();
//! outlet.navigate("/list/7", RouteAction::Push, None, None, None);
//! outlet.sync();
//! assert_eq!(outlet.route_info().pushed_by_route.as_deref(), Some("/list"));
//!
//! outlet.navigate_back(None);
//! outlet.sync();
//! assert_eq!(outlet.route_info().pathname, "/list");
//! assert_eq!(outlet.route_info().route_action, Some(RouteAction::Pop));
//! ```

use crate::emitter::{ChangeSource, LocationEmitter};
use crate::error::{NavigationError, NavigationResult};
use crate::history::LocationHistory;
use crate::ids::{IdGenerator, SequentialIds};
use crate::manager::RouteManager;
use crate::matching::{NoParams, RouteMatcher};
use crate::resolver::{resolve_transition, NavigationIntent, PendingIntent, ResolveContext, Resolution};
use crate::route_info::{Location, LocationChange, RouteAction, RouteDirection, RouteInfo, RouteOptions};
use crate::subscribers::Subscription;
use crate::{debug_log, info_log, trace_log, warn_log};

// ============================================================================
// Configuration
// ============================================================================

/// Tunables for an [`Outlet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutletConfig {
    /// Prefix passed to the id generator for new entries.
    pub id_prefix: String,
    /// Where [`Outlet::navigate_back`] goes when no ancestor is known and the
    /// caller gives no fallback.
    pub default_back_path: String,
}

impl OutletConfig {
    /// Set the id prefix.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Set the default back-navigation fallback.
    pub fn with_default_back_path(mut self, path: impl Into<String>) -> Self {
        self.default_back_path = path.into();
        self
    }
}

impl Default for OutletConfig {
    fn default() -> Self {
        Self {
            id_prefix: "routeInfo".to_string(),
            default_back_path: "/".to_string(),
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for an [`Outlet`].
///
/// ```
/// use tab_navigator::emitter::MemoryHistory;
/// use tab_navigator::matching::RouteTable;
/// use tab_navigator::{Location, Outlet, OutletConfig};
///
/// let outlet = Outlet::builder(MemoryHistory::new("/tabs/home"))
///     .config(OutletConfig::default().with_default_back_path("/tabs/home"))
///     .matcher(RouteTable::new().route("/tabs/:tab").unwrap())
///     .initial_location(Location::parse("/tabs/home"))
///     .initial_tab("home")
///     .build();
///
/// assert_eq!(outlet.history().len(), 1);
/// assert_eq!(outlet.route_info().tab.as_deref(), Some("home"));
/// assert_eq!(outlet.route_info().params.get("tab"), Some(&"home".to_string()));
/// ```
pub struct OutletBuilder<E> {
    emitter: E,
    config: OutletConfig,
    matcher: Box<dyn RouteMatcher>,
    ids: Box<dyn IdGenerator>,
    initial_location: Option<Location>,
    initial_tab: Option<String>,
}

impl<E: LocationEmitter> OutletBuilder<E> {
    fn new(emitter: E) -> Self {
        Self {
            emitter,
            config: OutletConfig::default(),
            matcher: Box::new(NoParams),
            ids: Box::new(SequentialIds),
            initial_location: None,
            initial_tab: None,
        }
    }

    /// Replace the configuration.
    pub fn config(mut self, config: OutletConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the route-parameter matcher.
    pub fn matcher(mut self, matcher: impl RouteMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// Set the id generator.
    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Seed history with an entry at the location the outlet mounts on.
    pub fn initial_location(mut self, location: Location) -> Self {
        self.initial_location = Some(location);
        self
    }

    /// Set the tab the outlet starts on.
    pub fn initial_tab(mut self, tab: impl Into<String>) -> Self {
        self.initial_tab = Some(tab.into());
        self
    }

    /// Build the outlet.
    pub fn build(self) -> Outlet<E> {
        let mut outlet = Outlet {
            emitter: self.emitter,
            history: LocationHistory::new(),
            current_tab: self.initial_tab,
            pending_intent: None,
            pending_route_change: None,
            current_pathname: None,
            manager: RouteManager::new(),
            matcher: self.matcher,
            ids: self.ids,
            config: self.config,
        };

        if let Some(location) = self.initial_location {
            let mut seed = RouteInfo::new(outlet.ids.generate_id(&outlet.config.id_prefix), &location);
            seed.tab = outlet.current_tab.clone();
            seed.params = outlet.matcher.match_params(&location.pathname);
            info_log!("Outlet mounted at '{}' (tab: {:?})", location, seed.tab);
            outlet.current_pathname = Some(location.pathname);
            outlet.history.add(seed);
        }
        outlet
    }
}

// ============================================================================
// Outlet
// ============================================================================

/// Stateful navigation coordinator for one navigation root.
pub struct Outlet<E> {
    emitter: E,
    history: LocationHistory,
    current_tab: Option<String>,
    pending_intent: Option<PendingIntent>,
    pending_route_change: Option<RouteInfo>,
    current_pathname: Option<String>,
    manager: RouteManager,
    matcher: Box<dyn RouteMatcher>,
    ids: Box<dyn IdGenerator>,
    config: OutletConfig,
}

impl<E: LocationEmitter> Outlet<E> {
    /// Create an outlet with default configuration and an empty history.
    pub fn new(emitter: E) -> Self {
        Self::builder(emitter).build()
    }

    /// Start building an outlet.
    pub fn builder(emitter: E) -> OutletBuilder<E> {
        OutletBuilder::new(emitter)
    }

    // ========================================================================
    // State
    // ========================================================================

    /// The current entry (a synthesized empty entry before anything is
    /// recorded).
    pub fn route_info(&self) -> &RouteInfo {
        self.history.current()
    }

    /// The recorded history.
    pub fn history(&self) -> &LocationHistory {
        &self.history
    }

    /// The tab the outlet currently shows.
    pub fn current_tab(&self) -> Option<&str> {
        self.current_tab.as_deref()
    }

    /// The navigation awaiting confirmation, if any.
    pub fn pending_intent(&self) -> Option<&PendingIntent> {
        self.pending_intent.as_ref()
    }

    /// Pathname of the last change notification processed.
    pub fn current_pathname(&self) -> Option<&str> {
        self.current_pathname.as_deref()
    }

    /// The capability handle for descendants.
    pub fn route_manager(&self) -> RouteManager {
        self.manager.clone()
    }

    pub fn config(&self) -> &OutletConfig {
        &self.config
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut E {
        &mut self.emitter
    }

    /// Take the last entry resolved while nobody was subscribed to route
    /// changes.
    pub fn take_pending_route_change(&mut self) -> Option<RouteInfo> {
        self.pending_route_change.take()
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// See [`RouteManager::on_route_change`].
    pub fn on_route_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&RouteInfo) + Send + Sync + 'static,
    {
        self.manager.on_route_change(callback)
    }

    /// See [`RouteManager::on_exit_view_from_other_outlet`].
    pub fn on_exit_view_from_other_outlet<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.manager.on_exit_view_from_other_outlet(callback)
    }

    /// See [`RouteManager::exit_view_from_other_outlet`].
    pub fn exit_view_from_other_outlet(&self, pathname: &str) {
        self.manager.exit_view_from_other_outlet(pathname);
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Request a navigation to `path`.
    ///
    /// `Push` issues a raw push; `Replace` and `Pop` issue a raw replace.
    /// Without a `direction`, push goes forward, pop goes back and replace has
    /// none.
    pub fn navigate(
        &mut self,
        path: &str,
        action: RouteAction,
        direction: Option<RouteDirection>,
        options: Option<RouteOptions>,
        tab: Option<&str>,
    ) -> NavigationResult {
        let intent = NavigationIntent {
            route_action: action,
            route_direction: direction.unwrap_or_else(|| action.default_direction()),
            route_options: options,
            tab: tab.map(str::to_string),
        };
        self.pending_intent = Some(PendingIntent::Navigate(intent));
        self.issue(path, action)
    }

    /// Return to the entry the current one was pushed from.
    ///
    /// The ancestor is restored with a raw replace so the linear history does
    /// not grow. When there is no ancestor, a pop to `fallback` (or the
    /// configured default) is issued instead.
    pub fn navigate_back(&mut self, fallback: Option<&str>) -> NavigationResult {
        let current = self.history.current();
        if current.pushed_by_route.is_some() {
            if let Some(ancestor) = self.history.find_last_location(current) {
                let replay = RouteInfo {
                    route_action: Some(RouteAction::Pop),
                    route_direction: Some(RouteDirection::Back),
                    ..ancestor.clone()
                };
                debug_log!(
                    "Back from '{}' to ancestor {} at '{}'",
                    current.pathname,
                    replay.id,
                    replay.url()
                );
                let url = replay.url();
                self.pending_intent = Some(PendingIntent::Replay(replay));
                return self.issue(&url, RouteAction::Replace);
            }
        }

        let fallback = fallback
            .unwrap_or(&self.config.default_back_path)
            .to_string();
        warn_log!(
            "No ancestor recorded for '{}', falling back to '{}'",
            self.history.current().pathname,
            fallback
        );
        match self.navigate(&fallback, RouteAction::Pop, Some(RouteDirection::Back), None, None) {
            NavigationResult::Issued { url, .. } => NavigationResult::FellBack { url },
            other => other,
        }
    }

    /// Switch to `tab`, restoring exactly where it was left, or push `path`
    /// into it when the tab has no history yet.
    pub fn change_tab(
        &mut self,
        tab: &str,
        path: &str,
        options: Option<RouteOptions>,
    ) -> NavigationResult {
        match self.history.current_for_tab(tab) {
            Some(last) => {
                let replay = RouteInfo {
                    route_action: Some(RouteAction::Push),
                    route_direction: Some(RouteDirection::None),
                    ..last.clone()
                };
                debug_log!("Restoring tab '{}' at '{}' ({})", tab, replay.url(), replay.id);
                let url = replay.url();
                self.pending_intent = Some(PendingIntent::Replay(replay));
                self.issue(&url, RouteAction::Push)
            }
            None => {
                debug_log!("Tab '{}' has no history, entering at '{}'", tab, path);
                self.navigate(path, RouteAction::Push, Some(RouteDirection::None), options, Some(tab))
            }
        }
    }

    /// Return `tab` to its root, shown at `original_href`.
    ///
    /// The tab's first entry is replayed (keeping its id) with its location
    /// and options overridden, as a pop/back. A search string in
    /// `original_href` replaces the entry's own.
    pub fn reset_tab(
        &mut self,
        tab: &str,
        original_href: &str,
        original_options: Option<RouteOptions>,
    ) -> NavigationResult {
        let Some(first) = self.history.first_for_tab(tab) else {
            let err = NavigationError::UnknownTab {
                tab: tab.to_string(),
            };
            warn_log!("Cannot reset tab: {}", err);
            return NavigationResult::Ignored {
                reason: err.to_string(),
            };
        };

        let href = Location::parse(original_href);
        let mut root = RouteInfo {
            pathname: href.pathname,
            route_options: original_options,
            route_action: Some(RouteAction::Pop),
            route_direction: Some(RouteDirection::Back),
            ..first.clone()
        };
        if !href.search.is_empty() {
            root.search = href.search;
        }
        debug_log!("Resetting tab '{}' to '{}' ({})", tab, root.url(), root.id);
        let url = root.url();
        self.pending_intent = Some(PendingIntent::Replay(root));
        self.issue(&url, RouteAction::Push)
    }

    /// Record that `tab` is now shown.
    ///
    /// If the current entry belongs to another tab it is relabelled in place;
    /// nothing is appended and subscribers are not notified.
    pub fn set_current_tab(&mut self, tab: &str) {
        self.current_tab = Some(tab.to_string());
        let current = self.history.current();
        if !current.is_in_tab(tab) {
            let relabelled = RouteInfo {
                tab: Some(tab.to_string()),
                ..current.clone()
            };
            if self.history.update(relabelled) {
                debug_log!("Relabelled current entry as tab '{}'", tab);
            }
        }
    }

    // ========================================================================
    // Change notifications
    // ========================================================================

    /// Process one change notification from the emitter.
    ///
    /// Consumes the pending intent, records the resolved entry (if the change
    /// leaves the current one) and notifies route-change subscribers with the
    /// current entry. Returns `true` if an entry was recorded.
    pub fn handle_location_change(&mut self, change: LocationChange) -> bool {
        let intent = self.pending_intent.take();
        let resolution = resolve_transition(
            ResolveContext {
                history: &self.history,
                current_tab: self.current_tab.as_deref(),
                ids: self.ids.as_mut(),
                matcher: self.matcher.as_mut(),
                id_prefix: &self.config.id_prefix,
            },
            &change,
            intent,
        );

        let recorded = match resolution {
            Resolution::Record(next) => {
                self.history.add(next);
                true
            }
            Resolution::Unchanged => false,
        };

        let route_info = self.history.current().clone();
        if self.manager.route_change_subscribers() == 0 {
            trace_log!("No route-change subscribers; parking '{}'", route_info.url());
            self.pending_route_change = Some(route_info.clone());
        }
        self.manager.notify_route_change(&route_info);
        self.current_pathname = Some(change.location.pathname);
        recorded
    }

    fn issue(&mut self, url: &str, action: RouteAction) -> NavigationResult {
        info_log!("Navigation {}: '{}'", action, url);
        let issued = match action {
            RouteAction::Push => self.emitter.push(url),
            RouteAction::Replace | RouteAction::Pop => self.emitter.replace(url),
        };
        match issued {
            Ok(()) => NavigationResult::Issued {
                url: url.to_string(),
                action,
            },
            Err(err) => {
                warn_log!("Emitter refused navigation: {}", err);
                NavigationResult::Error(err)
            }
        }
    }
}

impl<E: LocationEmitter + ChangeSource> Outlet<E> {
    /// Feed every queued change notification through
    /// [`handle_location_change`](Self::handle_location_change).
    ///
    /// Returns the number of notifications processed.
    pub fn sync(&mut self) -> usize {
        let mut processed = 0;
        while let Some(change) = self.emitter.poll_change() {
            self.handle_location_change(change);
            processed += 1;
        }
        processed
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for Outlet<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outlet")
            .field("emitter", &self.emitter)
            .field("current_tab", &self.current_tab)
            .field("pending_intent", &self.pending_intent)
            .field("history_len", &self.history.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
