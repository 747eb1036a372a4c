//! # pagebox
//!
//! A declarative page builder and path router for retained-mode widget
//! toolkits.
//!
//! Page functions are registered against path patterns such as
//! `/users/{id}`. When a client navigates, the matching function receives a
//! fresh [`Builder`] and fills a widget tree with nested scopes; the tree is
//! pushed onto the client's view stack and shown by the host.
//!
//! ## Core Systems
//!
//! - **[`widget`]**: `Widget` trait, widget classes, slot classification
//! - **[`widgets`]**: built-in widget set (View, Column, Row, Text, ...)
//! - **[`registry`]**: widget lookup by name, extension namespaces
//! - **[`dom`]**: slotmap-backed widget arena with slot-aware attachment
//! - **[`builder`]**: cursor-based tree construction with scoped nesting
//! - **[`page`]**: finished page trees, the view stack, the `Host` seam
//! - **[`router`]**: path patterns, parameters, the route table
//! - **[`dispatch`]**: page functions and navigation handling
//! - **[`session`]**: per-client sessions on tokio tasks
//! - **[`app`]**: application setup, configuration, launch
//! - **[`testing`]**: headless host and the `Pilot`

// Widget system
pub mod registry;
pub mod widget;
pub mod widgets;

// Trees
pub mod builder;
pub mod dom;
pub mod page;

// Navigation
pub mod dispatch;
pub mod router;
pub mod session;

// Application
pub mod app;
pub mod testing;

pub use app::{App, AppConfig, AppView, Runtime, WebRenderer};
pub use builder::{BuildError, Builder, Scope};
pub use dispatch::{page_fn, DispatchError, Navigation, PageContext, PageError};
pub use page::{Host, PageTree, ViewStack};
pub use registry::Registry;
pub use router::{Params, RouteError};
pub use session::{HostEvent, Server, Session, SessionHandle};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use pagebox_macros::page;
