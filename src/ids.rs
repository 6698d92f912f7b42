//! Unique id generation for history entries.
//!
//! The resolver asks an [`IdGenerator`] for a fresh id whenever a user-driven
//! navigation creates a new entry. [`SequentialIds`] is the default: ids look
//! like `routeInfo-17` and are unique across the whole process, even when
//! several outlets each own a generator.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter backing [`SequentialIds`].
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Supplier of opaque unique strings.
pub trait IdGenerator: Send {
    /// Return a new id starting with `prefix`.
    fn generate_id(&mut self, prefix: &str) -> String;
}

/// Default generator: `{prefix}-{n}` from a process-wide counter.
///
/// ```
/// use tab_navigator::ids::{IdGenerator, SequentialIds};
///
/// let mut ids = SequentialIds;
/// let a = ids.generate_id("routeInfo");
/// let b = ids.generate_id("routeInfo");
/// assert!(a.starts_with("routeInfo-"));
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIds;

impl IdGenerator for SequentialIds {
    fn generate_id(&mut self, prefix: &str) -> String {
        let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", prefix, n)
    }
}

impl<F> IdGenerator for F
where
    F: FnMut(&str) -> String + Send,
{
    fn generate_id(&mut self, prefix: &str) -> String {
        self(prefix)
    }
}
