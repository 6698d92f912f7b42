//! Error handling for the navigator.
//!
//! Navigation failures in this crate are almost always recovered locally: a
//! back navigation without a known ancestor falls back to a generic pop, an
//! empty history hands out a synthesized empty entry, and an unknown tab is
//! reported as absence. What remains is reported through two types:
//!
//! - [`NavigationResult`]: the outcome of a façade operation
//!   (`Issued`, `FellBack`, `Ignored`, `Error`).
//! - [`NavigationError`]: a detailed error variant (emitter rejected the
//!   navigation, unknown tab, invalid route pattern, ...).
//!
//! # Examples
//!
//! ```
//! use tab_navigator::error::NavigationResult;
//! use tab_navigator::RouteAction;
//!
//! let result = NavigationResult::Issued {
//!     url: "/home".into(),
//!     action: RouteAction::Push,
//! };
//! assert!(result.is_issued());
//! assert_eq!(result.url(), Some("/home"));
//!
//! let fallback = NavigationResult::FellBack { url: "/".into() };
//! assert!(fallback.is_fallback());
//! ```

use crate::route_info::RouteAction;
use std::fmt;

// ============================================================================
// Navigation Result Types
// ============================================================================

/// Outcome of a navigation request made through an
/// [`Outlet`](crate::outlet::Outlet).
///
/// A successful result only means the raw push/replace was handed to the
/// location emitter. History changes once the emitter's change notification
/// is fed back into the outlet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    /// A raw push or replace was issued to the location emitter.
    Issued { url: String, action: RouteAction },
    /// Back navigation had no resolvable ancestor; a generic pop to the
    /// fallback path was issued instead.
    FellBack { url: String },
    /// Nothing was issued.
    Ignored { reason: String },
    /// The emitter refused the navigation.
    Error(NavigationError),
}

/// Detailed error variants that can occur during navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The location emitter refused a push or replace
    EmitterRejected { url: String, reason: String },

    /// No history entry belongs to the tab
    UnknownTab { tab: String },

    /// A route pattern could not be registered
    InvalidPattern { pattern: String, message: String },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::EmitterRejected { url, reason } => {
                write!(f, "Navigation to '{}' rejected: {}", url, reason)
            }
            NavigationError::UnknownTab { tab } => {
                write!(f, "No history for tab: {}", tab)
            }
            NavigationError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid route pattern '{}': {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for NavigationError {}

impl NavigationResult {
    /// Check if a navigation was handed to the emitter as requested
    pub fn is_issued(&self) -> bool {
        matches!(self, NavigationResult::Issued { .. })
    }

    /// Check if back navigation fell back to the default path
    pub fn is_fallback(&self) -> bool {
        matches!(self, NavigationResult::FellBack { .. })
    }

    /// Check if the request was ignored
    pub fn is_ignored(&self) -> bool {
        matches!(self, NavigationResult::Ignored { .. })
    }

    /// Check if there was an error
    pub fn is_error(&self) -> bool {
        matches!(self, NavigationResult::Error(_))
    }

    /// URL handed to the emitter, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            NavigationResult::Issued { url, .. } | NavigationResult::FellBack { url } => Some(url),
            _ => None,
        }
    }

    /// The error, if the emitter refused the navigation
    pub fn error(&self) -> Option<&NavigationError> {
        match self {
            NavigationResult::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NavigationError> for NavigationResult {
    fn from(err: NavigationError) -> Self {
        NavigationResult::Error(err)
    }
}

// ============================================================================
// Tests
// ============================================================================
