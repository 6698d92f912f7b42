//! Observer registry used for route-change and exit-view broadcasts.
//!
//! [`Subscribers<T>`] keeps callbacks in registration order. Registering
//! returns a [`Subscription`] whose [`unsubscribe`](Subscription::unsubscribe)
//! removes exactly that callback, even if the same closure was registered
//! twice.
//!
//! Broadcasting snapshots the callback list first, so a callback may register
//! or unregister subscribers (including itself) while it runs. Each callback
//! is invoked in isolation: a panic is caught, logged, and the remaining
//! callbacks still run.

use crate::{debug_log, error_log};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T: ?Sized> {
    next_handle: u64,
    callbacks: Vec<(u64, Callback<T>)>,
}

/// Ordered set of callbacks receiving `&T`.
pub struct Subscribers<T: ?Sized> {
    name: &'static str,
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T: ?Sized + 'static> Subscribers<T> {
    /// Create an empty registry. `name` only appears in log output.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            registry: Arc::new(Mutex::new(Registry {
                next_handle: 0,
                callbacks: Vec::new(),
            })),
        }
    }

    /// Register a callback.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut registry = self.lock();
        let handle = registry.next_handle;
        registry.next_handle += 1;
        registry.callbacks.push((handle, Arc::new(callback)));
        debug_log!(
            "{} subscriber #{} registered ({} active)",
            self.name,
            handle,
            registry.callbacks.len()
        );

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.registry);
        Subscription {
            handle,
            remove: Some(Box::new(move |handle| {
                if let Some(registry) = weak.upgrade() {
                    let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
                    registry.callbacks.retain(|(h, _)| *h != handle);
                }
            })),
        }
    }

    /// Call every registered callback with `value`, in registration order.
    ///
    /// Returns the number of callbacks that completed without panicking.
    pub fn broadcast(&self, value: &T) -> usize {
        let snapshot: Vec<(u64, Callback<T>)> = self.lock().callbacks.clone();
        let mut completed = 0;
        for entry in snapshot {
            let outcome = catch_unwind(AssertUnwindSafe(|| (*entry.1)(value)));
            if outcome.is_ok() {
                completed += 1;
                continue;
            }
            let message = panic_message(outcome);
            error_log!(
                "{} subscriber #{} panicked: {}",
                self.name,
                entry.0,
                message
            );
        }
        completed
    }

    /// Return the number of registered callbacks.
    pub fn len(&self) -> usize {
        self.lock().callbacks.len()
    }

    /// Return `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Registry<T>> {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg_attr(not(any(feature = "log", feature = "tracing")), allow(dead_code))]
fn panic_message(outcome: std::thread::Result<()>) -> String {
    let Err(payload) = outcome else {
        return String::new();
    };
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

impl<T: ?Sized> Clone for Subscribers<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Handle returned by [`Subscribers::subscribe`].
///
/// Dropping the handle keeps the callback registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
pub struct Subscription {
    handle: u64,
    remove: Option<Box<dyn FnOnce(u64) + Send + Sync>>,
}

impl Subscription {
    /// Remove the callback this handle was returned for.
    pub fn unsubscribe(mut self) {
        if let Some(remove) = self.remove.take() {
            remove(self.handle);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}
