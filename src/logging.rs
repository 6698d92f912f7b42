//! Logging abstraction layer.
//!
//! Navigation decisions (which entry is being left, which resolver branch
//! fired, why a back navigation fell back) are reported through the macros
//! below. They dispatch to the [`log`](https://docs.rs/log) crate, the
//! [`tracing`](https://docs.rs/tracing) crate, or both, depending on which
//! features are enabled. The features may be combined, in which case every
//! event goes to both backends; with neither enabled the macros expand to
//! nothing.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! Levels used by the crate:
//!
//! - `trace_log!`: history lookups, cache hits.
//! - `debug_log!`: resolver decisions and subscriber bookkeeping.
//! - `info_log!`: navigations handed to the location emitter.
//! - `warn_log!`: fallbacks and rejected navigations.
//! - `error_log!`: a subscriber panicked during a broadcast.
//!
//! ```ignore
//! use tab_navigator::{debug_log, warn_log};
//!
//! debug_log!("Leaving '{}' for '{}'", leaving, next);
//! warn_log!("No ancestor for '{}', falling back to '{}'", current, fallback);
//! ```

/// Emit a **trace**-level log message.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// Emit a **debug**-level log message.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

/// Emit an **info**-level log message.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)*);
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// Emit a **warn**-level log message.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

/// Emit an **error**-level log message.
///
/// Used when a subscriber callback panics; the broadcast continues.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)*);
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
    };
}
