//! Navigation entry model.
//!
//! A [`RouteInfo`] describes one entry of the navigation history: where the
//! user is, how they got there, which tab owns the view, and which ancestor
//! entry a back navigation should restore. Entries are values; a change to an
//! entry replaces it wholesale.
//!
//! The raw side of navigation is modelled by [`Location`] (pathname and
//! search), [`HistoryAction`] (what the underlying history stack did) and
//! [`LocationChange`] (one notification from the location emitter).

use crate::params::{QueryParams, RouteParams};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Actions and directions
// ============================================================================

/// How an entry was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteAction {
    /// A new view was pushed on top of the current one.
    Push,
    /// The user returned to an earlier view.
    Pop,
    /// The current view was swapped for another one.
    Replace,
}

impl RouteAction {
    /// Direction used when a caller does not supply one.
    pub fn default_direction(self) -> RouteDirection {
        match self {
            RouteAction::Push => RouteDirection::Forward,
            RouteAction::Pop => RouteDirection::Back,
            RouteAction::Replace => RouteDirection::None,
        }
    }
}

impl fmt::Display for RouteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteAction::Push => write!(f, "push"),
            RouteAction::Pop => write!(f, "pop"),
            RouteAction::Replace => write!(f, "replace"),
        }
    }
}

/// Transition hint for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteDirection {
    Forward,
    Back,
    None,
}

impl fmt::Display for RouteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteDirection::Forward => write!(f, "forward"),
            RouteDirection::Back => write!(f, "back"),
            RouteDirection::None => write!(f, "none"),
        }
    }
}

/// What the underlying linear history did, as reported by the location
/// emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryAction {
    Push,
    Replace,
    Pop,
}

// ============================================================================
// Route options
// ============================================================================

/// Opaque caller-supplied payload carried along with a navigation.
///
/// The navigator never inspects the payload. Clones share the same value and
/// two options compare equal only when they share it.
///
/// ```
/// use tab_navigator::RouteOptions;
///
/// let options = RouteOptions::new(42_u32);
/// assert_eq!(options.downcast_ref::<u32>(), Some(&42));
/// assert_eq!(options.downcast_ref::<String>(), None);
/// ```
#[derive(Clone)]
pub struct RouteOptions(Arc<dyn Any + Send + Sync>);

impl RouteOptions {
    /// Wrap a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the payload as `T`, if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for RouteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RouteOptions(..)")
    }
}

impl PartialEq for RouteOptions {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// ============================================================================
// Location
// ============================================================================

/// An addressable location: pathname plus search string.
///
/// `search` keeps its leading `?` (or is empty), so `pathname + search` is the
/// URL handed to the emitter.
///
/// ```
/// use tab_navigator::Location;
///
/// let location = Location::parse("/users/7?tab=posts");
/// assert_eq!(location.pathname, "/users/7");
/// assert_eq!(location.search, "?tab=posts");
/// assert_eq!(location.url(), "/users/7?tab=posts");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub pathname: String,
    pub search: String,
}

impl Location {
    /// Create a location from its parts.
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: search.into(),
        }
    }

    /// Split a URL into pathname and search. A fragment is dropped.
    pub fn parse(url: &str) -> Self {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        match url.find('?') {
            Some(pos) => Self::new(&url[..pos], &url[pos..]),
            None => Self::new(url, ""),
        }
    }

    /// Pathname followed by the search string.
    pub fn url(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pathname, self.search)
    }
}

/// One raw notification from the location emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationChange {
    pub location: Location,
    pub action: HistoryAction,
}

impl LocationChange {
    pub fn new(location: Location, action: HistoryAction) -> Self {
        Self { location, action }
    }
}

// ============================================================================
// RouteInfo
// ============================================================================

/// One navigation history entry.
///
/// `route_action` and `route_direction` are absent only on entries that were
/// not produced by a navigation: the seed entry of an outlet and the
/// synthesized empty entry returned by an empty
/// [`LocationHistory`](crate::history::LocationHistory).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteInfo {
    /// Unique identifier, assigned when the entry is first created.
    pub id: String,
    pub pathname: String,
    pub search: String,
    /// Owning tab; views outside any tab have none.
    pub tab: Option<String>,
    pub route_action: Option<RouteAction>,
    pub route_direction: Option<RouteDirection>,
    /// Pathname of the entry that was left to reach this one.
    pub last_pathname: Option<String>,
    /// Pathname of the ancestor a back navigation should restore.
    pub pushed_by_route: Option<String>,
    pub params: RouteParams,
    pub route_options: Option<RouteOptions>,
}

impl RouteInfo {
    /// Create an entry at `location` with no navigation metadata.
    pub fn new(id: impl Into<String>, location: &Location) -> Self {
        Self {
            id: id.into(),
            pathname: location.pathname.clone(),
            search: location.search.clone(),
            ..Self::default()
        }
    }

    /// Set the owning tab.
    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = Some(tab.into());
        self
    }

    /// Set the ancestor pathname restored by back navigation.
    pub fn with_pushed_by_route(mut self, pathname: impl Into<String>) -> Self {
        self.pushed_by_route = Some(pathname.into());
        self
    }

    /// Pathname followed by the search string.
    pub fn url(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }

    /// The entry's location.
    pub fn location(&self) -> Location {
        Location::new(self.pathname.clone(), self.search.clone())
    }

    /// Parse `search` into query parameters.
    pub fn query(&self) -> QueryParams {
        QueryParams::from_query_string(self.search.trim_start_matches('?'))
    }

    /// Return `true` for the synthesized empty entry.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.pathname.is_empty()
    }

    /// Return `true` if the entry belongs to `tab`.
    pub fn is_in_tab(&self, tab: &str) -> bool {
        self.tab.as_deref() == Some(tab)
    }
}
