//! # Floem Breakpoints
//! Named viewport-width ranges with callbacks that fire when the viewport
//! enters them.
//!
//! ## Example
//! ```rust
//! use floem_breakpoints::prelude::*;
//! use floem_breakpoints::headless::HeadlessViewport;
//!
//! let viewport = HeadlessViewport::new(500.0);
//! let breakpoints = Breakpoints::new(viewport.clone());
//!
//! breakpoints.define([
//!     ("mobile", BreakpointDefinition::up_to(767)),
//!     ("tablet", BreakpointDefinition::between(768, 1199)),
//!     ("desktop", BreakpointDefinition::from_min(1200)),
//! ]);
//!
//! let on_tablet = BreakpointCallback::new(|event, breakpoint| {
//!     println!("entered {} ({:?})", breakpoint.name(), event.map(|e| &e.media));
//! });
//! breakpoints.on("tablet", &on_tablet);
//!
//! // prints "entered tablet"
//! viewport.set_width(900.0);
//!
//! breakpoints.off("tablet", &on_tablet);
//! ```
//!
//! ## Breakpoints
//! A breakpoint is defined by an optional `min` and `max` width in pixels.
//! Negative minimums and zero or [unbounded](MaxWidth::Unbounded) maximums
//! count as unset; unset bounds default to `0` and unbounded. Every
//! breakpoint with at least one bound gets a live [`MediaWatcher`] for a query
//! such as `(min-width: 768px) and (max-width: 1199px)`. A breakpoint with
//! neither bound has no watcher and is never matched.
//!
//! Defining a name again replaces its breakpoint and watcher. Callbacks
//! attached to the old breakpoint are not carried over: they stay on the old
//! watcher, keep firing when the viewport enters the old range, and can no
//! longer be detached with [`Breakpoints::off`].
//!
//! ## Callbacks
//! [`Breakpoints::on`] calls back every time the watcher reports a change
//! while the breakpoint is matched, which in practice means when the viewport
//! enters the range. Leaving a range is not reported; subscribe to the
//! neighbouring breakpoints instead.
//!
//! ## The thread registry
//! Besides owned [`Breakpoints`] instances there is one registry per thread,
//! installed with [`init`] and used by the free functions [`define`], [`get`],
//! [`on`], [`off`] and friends. In a browser build with the `web` feature the
//! registry is created on first use on top of `window.matchMedia`.
//!
//! ## Platforms
//! Watchers come from a [`MediaMatcher`]. The crate ships
//! [`HeadlessViewport`](headless::HeadlessViewport), driven by the caller, and
//! on `wasm32` with the `web` feature `web::WindowMatcher`.

pub mod breakpoint;
#[cfg(feature = "serde")]
pub mod config;
mod dispatch;
pub mod error;
pub mod headless;
pub mod media;
pub mod query;
pub mod registry;
pub mod responsive;
pub mod subscription;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

pub use breakpoint::{Breakpoint, BreakpointDefinition, BreakpointField, FieldValue, MaxWidth};
#[cfg(feature = "serde")]
pub use config::{BreakpointConfig, define_value};
pub use error::BreakpointError;
pub use media::{MediaListener, MediaMatcher, MediaQueryEvent, MediaWatcher};
pub use query::MediaQuery;
pub use registry::{Breakpoints, define, global, init};
pub use responsive::GridBreakpoints;
pub use subscription::{BreakpointCallback, get, get_field, off, on, subscribe};

pub mod prelude {
    pub use crate::breakpoint::{Breakpoint, BreakpointDefinition, BreakpointField, MaxWidth};
    pub use crate::registry::Breakpoints;
    pub use crate::subscription::BreakpointCallback;
}
