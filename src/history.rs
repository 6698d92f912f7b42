//! Location history storage.
//!
//! [`LocationHistory`] is the flat, chronological list of every
//! [`RouteInfo`] an outlet has recorded. Tabs partition it through each
//! entry's `tab` field and back navigation threads through it by pathname
//! (`pushed_by_route`), so no tree is stored. Entries are only ever appended
//! or updated in place; nothing is removed or reordered.

use crate::route_info::RouteInfo;
use crate::trace_log;

/// Ordered store of navigation entries.
///
/// # Example
///
/// ```
/// use tab_navigator::{Location, LocationHistory, RouteInfo};
///
/// let mut history = LocationHistory::new();
/// history.add(RouteInfo::new("a", &Location::parse("/x")).with_tab("home"));
/// history.add(
///     RouteInfo::new("b", &Location::parse("/y"))
///         .with_tab("home")
///         .with_pushed_by_route("/x"),
/// );
///
/// assert_eq!(history.current().pathname, "/y");
/// assert_eq!(history.previous().pathname, "/x");
/// assert_eq!(history.find_last_location(history.current()).unwrap().id, "a");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocationHistory {
    entries: Vec<RouteInfo>,
    /// Returned by `current()`/`previous()` while no entry exists.
    empty: RouteInfo,
}

impl LocationHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    ///
    /// Ids are not checked for uniqueness; callers generate them.
    pub fn add(&mut self, entry: RouteInfo) {
        trace_log!(
            "History add #{}: '{}' (id: {}, tab: {:?})",
            self.entries.len(),
            entry.url(),
            entry.id,
            entry.tab
        );
        self.entries.push(entry);
    }

    /// Replace the stored entry that shares `entry.id`.
    ///
    /// When a replayed entry has left several slots with the same id, the most
    /// recent one is replaced. Returns `false` if no entry carries the id.
    pub fn update(&mut self, entry: RouteInfo) -> bool {
        match self.position_of(&entry.id) {
            Some(index) => {
                trace_log!("History update #{}: '{}' (id: {})", index, entry.url(), entry.id);
                self.entries[index] = entry;
                true
            }
            None => false,
        }
    }

    /// The last entry, or a synthesized empty entry if there is none.
    pub fn current(&self) -> &RouteInfo {
        self.entries.last().unwrap_or(&self.empty)
    }

    /// The second-to-last entry, or [`current`](Self::current) if there are
    /// fewer than two.
    pub fn previous(&self) -> &RouteInfo {
        match self.entries.len() {
            0 | 1 => self.current(),
            len => &self.entries[len - 2],
        }
    }

    /// The most recent entry belonging to `tab`.
    pub fn current_for_tab(&self, tab: &str) -> Option<&RouteInfo> {
        self.entries.iter().rev().find(|entry| entry.is_in_tab(tab))
    }

    /// The earliest entry belonging to `tab`.
    pub fn first_for_tab(&self, tab: &str) -> Option<&RouteInfo> {
        self.entries.iter().find(|entry| entry.is_in_tab(tab))
    }

    /// Most recent entry whose tab equals `tab`, where `None` matches entries
    /// outside any tab.
    pub(crate) fn latest_with_tab(&self, tab: Option<&str>) -> Option<&RouteInfo> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.tab.as_deref() == tab)
    }

    /// Find the entry `entry` was pushed from.
    ///
    /// Scans backward from just before `entry` (from the end of history if
    /// `entry` is not stored) for the first entry whose pathname equals
    /// `entry.pushed_by_route`.
    pub fn find_last_location(&self, entry: &RouteInfo) -> Option<&RouteInfo> {
        let target = entry.pushed_by_route.as_deref()?;
        let end = self.position_of(&entry.id).unwrap_or(self.entries.len());
        let found = self.entries[..end]
            .iter()
            .rev()
            .find(|candidate| candidate.pathname == target);
        trace_log!(
            "find_last_location('{}' pushed by '{}') -> {:?}",
            entry.pathname,
            target,
            found.map(|r| r.id.as_str())
        );
        found
    }

    /// Look up the most recent entry carrying `id`.
    pub fn get(&self, id: &str) -> Option<&RouteInfo> {
        self.position_of(id).map(|index| &self.entries[index])
    }

    /// All entries in chronological order.
    pub fn entries(&self) -> &[RouteInfo] {
        &self.entries
    }

    /// Iterate over entries belonging to `tab`, oldest first.
    pub fn entries_for_tab<'a>(&'a self, tab: &'a str) -> impl Iterator<Item = &'a RouteInfo> + 'a {
        self.entries.iter().filter(move |entry| entry.is_in_tab(tab))
    }

    /// Return the number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        if id.is_empty() {
            return None;
        }
        self.entries.iter().rposition(|entry| entry.id == id)
    }
}
