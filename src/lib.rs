//! Tab-aware navigation history.
//!
//! Applications built from several independent navigation stacks (tabs) sit
//! on top of a single linear history: the browser's, or any router that only
//! knows push, replace and pop. This crate reconciles that linear stream into
//! a tab-aware model. For every location change it works out which logical
//! entry the user is on, which tab owns it, and which earlier entry a back
//! navigation should restore.
//!
//! # Overview
//!
//! - [`RouteInfo`]: one navigation entry.
//! - [`LocationHistory`]: the flat, append-only list of entries with per-tab
//!   and ancestor lookups.
//! - [`resolver`]: turns a raw location change plus the pending navigation
//!   intent into the next entry.
//! - [`Outlet`]: the façade. It issues navigations to a
//!   [`LocationEmitter`](emitter::LocationEmitter), consumes its change
//!   notifications, updates history and notifies subscribers.
//! - [`RouteManager`]: subscription and exit-view broadcast handle handed to
//!   descendants of an outlet.
//!
//! # Example
//!
//! ```
//! use tab_navigator::emitter::MemoryHistory;
//! use tab_navigator::{Location, Outlet, RouteAction};
//!
//! let mut outlet = Outlet::builder(MemoryHistory::new("/tabs/home"))
//!     .initial_location(Location::parse("/tabs/home"))
//!     .initial_tab("home")
//!     .build();
//!
//! // Drill down inside the home tab.
//! outlet.navigate("/tabs/home/item/1", RouteAction::Push, None, None, None);
//! outlet.sync();
//!
//! // Visit the settings tab, then come back: home is restored where it was.
//! outlet.change_tab("settings", "/tabs/settings", None);
//! outlet.sync();
//! outlet.set_current_tab("settings");
//! outlet.change_tab("home", "/tabs/home", None);
//! outlet.sync();
//!
//! assert_eq!(outlet.route_info().pathname, "/tabs/home/item/1");
//! assert_eq!(outlet.route_info().tab.as_deref(), Some("home"));
//! ```
//!
//! # Features
//!
//! | Feature   | Default | Effect |
//! |-----------|---------|--------|
//! | `log`     | yes     | Log through the `log` crate |
//! | `tracing` | no      | Log through the `tracing` crate |
//! | `cache`   | yes     | LRU cache for [`RouteTable`](matching::RouteTable) lookups |
//! | `matchit` | no      | `MatchitTable`, a radix-tree route matcher |

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod logging;

#[cfg(feature = "cache")]
pub mod cache;
pub mod emitter;
pub mod error;
pub mod history;
pub mod ids;
pub mod manager;
pub mod matching;
pub mod outlet;
pub mod params;
pub mod resolver;
pub mod route_info;
pub mod subscribers;

pub use emitter::{ChangeSource, LocationEmitter, MemoryHistory};
pub use error::{NavigationError, NavigationResult};
pub use history::LocationHistory;
pub use ids::{IdGenerator, SequentialIds};
pub use manager::RouteManager;
pub use matching::{RouteMatcher, RouteTable};
pub use outlet::{Outlet, OutletBuilder, OutletConfig};
pub use params::{QueryParams, RouteParams};
pub use resolver::{NavigationIntent, PendingIntent, Resolution};
pub use route_info::{
    HistoryAction, Location, LocationChange, RouteAction, RouteDirection, RouteInfo, RouteOptions,
};
pub use subscribers::{Subscribers, Subscription};
