//! Raw location emitter.
//!
//! An outlet never mutates its history directly when asked to navigate. It
//! hands a raw push or replace to a [`LocationEmitter`] (the outer routing
//! layer) and waits for the emitter's change notification, which the host
//! feeds back through [`Outlet::handle_location_change`]. Emitters that queue
//! their notifications can also implement [`ChangeSource`], letting
//! [`Outlet::sync`] drain them.
//!
//! [`MemoryHistory`] is an in-memory emitter: a linear list of locations with
//! a cursor, like a browser history stack without the browser.
//!
//! [`Outlet::handle_location_change`]: crate::outlet::Outlet::handle_location_change
//! [`Outlet::sync`]: crate::outlet::Outlet::sync

use crate::error::NavigationError;
use crate::route_info::{HistoryAction, Location, LocationChange};
use crate::{debug_log, trace_log};
use std::collections::VecDeque;

/// The outer routing layer that owns the linear history.
pub trait LocationEmitter {
    /// Push `url` as a new history slot.
    fn push(&mut self, url: &str) -> Result<(), NavigationError>;

    /// Replace the current history slot with `url`.
    fn replace(&mut self, url: &str) -> Result<(), NavigationError>;
}

/// An emitter whose change notifications can be polled.
pub trait ChangeSource {
    /// Take the oldest undelivered change notification.
    fn poll_change(&mut self) -> Option<LocationChange>;
}

/// In-memory linear history.
///
/// Every accepted push, replace, `go_back` or `go_forward` queues one
/// [`LocationChange`]; nothing is delivered until it is polled.
///
/// # Example
///
/// ```
/// use tab_navigator::emitter::{ChangeSource, LocationEmitter, MemoryHistory};
/// use tab_navigator::HistoryAction;
///
/// let mut history = MemoryHistory::new("/");
/// history.push("/inbox?unread=1").unwrap();
///
/// let change = history.poll_change().unwrap();
/// assert_eq!(change.location.pathname, "/inbox");
/// assert_eq!(change.action, HistoryAction::Push);
/// assert_eq!(history.location().url(), "/inbox?unread=1");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
    pending: VecDeque<LocationChange>,
    blocked: Option<String>,
}

impl MemoryHistory {
    /// Create a history positioned at `initial_url`.
    pub fn new(initial_url: &str) -> Self {
        Self {
            entries: vec![Location::parse(initial_url)],
            index: 0,
            pending: VecDeque::new(),
            blocked: None,
        }
    }

    /// The location at the cursor.
    pub fn location(&self) -> &Location {
        &self.entries[self.index]
    }

    /// All locations in the linear history.
    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    /// Cursor position within [`entries`](Self::entries).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Refuse every push and replace with `reason` until unblocked.
    pub fn set_blocked(&mut self, reason: Option<&str>) {
        self.blocked = reason.map(str::to_string);
    }

    /// Move the cursor back one slot, as a browser back button would.
    ///
    /// Returns `false` at the start of history.
    pub fn go_back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.emit(HistoryAction::Pop);
        true
    }

    /// Move the cursor forward one slot.
    ///
    /// Returns `false` at the end of history.
    pub fn go_forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        self.emit(HistoryAction::Pop);
        true
    }

    /// Number of undelivered change notifications.
    pub fn pending_changes(&self) -> usize {
        self.pending.len()
    }

    fn check_blocked(&self, url: &str) -> Result<(), NavigationError> {
        match &self.blocked {
            Some(reason) => Err(NavigationError::EmitterRejected {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn emit(&mut self, action: HistoryAction) {
        let location = self.location().clone();
        trace_log!("MemoryHistory {:?} -> '{}'", action, location);
        self.pending.push_back(LocationChange::new(location, action));
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl LocationEmitter for MemoryHistory {
    fn push(&mut self, url: &str) -> Result<(), NavigationError> {
        self.check_blocked(url)?;
        // Pushing discards forward history
        self.entries.truncate(self.index + 1);
        self.entries.push(Location::parse(url));
        self.index += 1;
        self.emit(HistoryAction::Push);
        Ok(())
    }

    fn replace(&mut self, url: &str) -> Result<(), NavigationError> {
        self.check_blocked(url)?;
        self.entries[self.index] = Location::parse(url);
        self.emit(HistoryAction::Replace);
        Ok(())
    }
}

impl ChangeSource for MemoryHistory {
    fn poll_change(&mut self) -> Option<LocationChange> {
        let change = self.pending.pop_front()?;
        debug_log!(
            "Delivering {:?} '{}' ({} still queued)",
            change.action,
            change.location,
            self.pending.len()
        );
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_truncates_forward_history() {
        let mut history = MemoryHistory::new("/");
        history.push("/a").unwrap();
        history.push("/b").unwrap();
        assert!(history.go_back());
        history.push("/c").unwrap();

        let paths: Vec<&str> = history.entries().iter().map(|l| l.pathname.as_str()).collect();
        assert_eq!(paths, vec!["/", "/a", "/c"]);
        assert_eq!(history.index(), 2);
        assert!(!history.go_forward());
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut history = MemoryHistory::new("/");
        history.push("/a").unwrap();
        history.replace("/b?x=1").unwrap();

        assert_eq!(history.entries().len(), 2);
        assert_eq!(history.location().url(), "/b?x=1");
    }

    #[test]
    fn test_changes_are_queued_in_order() {
        let mut history = MemoryHistory::default();
        history.push("/a").unwrap();
        history.replace("/b").unwrap();
        history.go_back();

        assert_eq!(history.pending_changes(), 3);
        let actions: Vec<HistoryAction> =
            std::iter::from_fn(|| history.poll_change()).map(|c| c.action).collect();
        assert_eq!(
            actions,
            vec![HistoryAction::Push, HistoryAction::Replace, HistoryAction::Pop]
        );
        assert!(history.poll_change().is_none());
    }

    #[test]
    fn test_blocked_history_rejects_without_side_effects() {
        let mut history = MemoryHistory::new("/");
        history.set_blocked(Some("unsaved changes"));

        let err = history.push("/a").unwrap_err();
        assert!(matches!(err, NavigationError::EmitterRejected { .. }));
        assert!(history.replace("/b").is_err());
        assert_eq!(history.entries().len(), 1);
        assert_eq!(history.pending_changes(), 0);

        history.set_blocked(None);
        assert!(history.push("/a").is_ok());
    }

    #[test]
    fn test_go_back_at_start_is_noop() {
        let mut history = MemoryHistory::new("/");
        assert!(!history.go_back());
        assert_eq!(history.pending_changes(), 0);
    }
}
