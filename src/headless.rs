//! Headless viewport for tests, benchmarks and native hosts.
//!
//! [`HeadlessViewport`] implements [`MediaMatcher`] without a browser. It
//! keeps a viewport width that can be changed with
//! [`HeadlessViewport::set_width`], which behaves like resizing a window:
//! every live watcher is re-evaluated and the ones whose match state flipped
//! notify their listeners.
//!
//! # Example
//!
//! ```rust
//! use floem_breakpoints::{BreakpointDefinition, Breakpoints, headless::HeadlessViewport};
//!
//! let viewport = HeadlessViewport::new(1024.0);
//! let breakpoints = Breakpoints::new(viewport.clone());
//! breakpoints.define([("tablet", BreakpointDefinition::between(768, 1199))]);
//!
//! assert!(breakpoints.get("tablet").unwrap().is_matched());
//! viewport.set_width(1400.0);
//! assert!(!breakpoints.get("tablet").unwrap().is_matched());
//! ```

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use smallvec::SmallVec;

use crate::{
    error::BreakpointError,
    media::{MediaListener, MediaMatcher, MediaQueryEvent, MediaWatcher},
    query::MediaQuery,
};

/// An in-memory viewport whose width is set by the caller.
///
/// Cloning the handle shares the same viewport.
#[derive(Clone)]
pub struct HeadlessViewport {
    state: Rc<ViewportState>,
}

struct ViewportState {
    width: Cell<f64>,
    watchers: RefCell<Vec<Weak<HeadlessWatcher>>>,
}

impl Default for HeadlessViewport {
    /// A viewport 800 pixels wide.
    fn default() -> Self {
        Self::new(800.0)
    }
}

impl HeadlessViewport {
    pub fn new(width: f64) -> Self {
        Self {
            state: Rc::new(ViewportState {
                width: Cell::new(width),
                watchers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn width(&self) -> f64 {
        self.state.width.get()
    }

    /// Resize the viewport and notify the watchers whose match state changed.
    ///
    /// Notifications are delivered in watcher creation order. Listeners may
    /// create new watchers or resize the viewport again; watchers created
    /// during the notification pass start with the new width and are not
    /// notified for it.
    pub fn set_width(&self, width: f64) {
        self.state.width.set(width);

        let watchers: Vec<Rc<HeadlessWatcher>> = {
            let mut watchers = self.state.watchers.borrow_mut();
            watchers.retain(|watcher| watcher.strong_count() > 0);
            watchers.iter().filter_map(Weak::upgrade).collect()
        };

        for watcher in watchers {
            let matches = watcher.query.matches_width(self.state.width.get());
            if watcher.matches.replace(matches) != matches {
                watcher.notify(matches);
            }
        }
    }

    /// Number of watchers still alive on this viewport.
    pub fn live_watchers(&self) -> usize {
        self.state
            .watchers
            .borrow()
            .iter()
            .filter(|watcher| watcher.strong_count() > 0)
            .count()
    }
}

impl MediaMatcher for HeadlessViewport {
    fn match_media(&self, query: &MediaQuery) -> Result<Rc<dyn MediaWatcher>, BreakpointError> {
        let watcher = Rc::new(HeadlessWatcher {
            query: *query,
            matches: Cell::new(query.matches_width(self.width())),
            listeners: RefCell::new(SmallVec::new()),
        });
        let mut watchers = self.state.watchers.borrow_mut();
        watchers.retain(|watcher| watcher.strong_count() > 0);
        watchers.push(Rc::downgrade(&watcher));
        Ok(watcher)
    }
}

/// A watcher created by [`HeadlessViewport`].
pub struct HeadlessWatcher {
    query: MediaQuery,
    matches: Cell<bool>,
    listeners: RefCell<SmallVec<[MediaListener; 2]>>,
}

impl HeadlessWatcher {
    fn notify(&self, matches: bool) {
        let event = MediaQueryEvent {
            matches,
            media: self.query.to_string(),
        };
        // listeners may detach themselves while being called
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&event);
        }
    }
}

impl MediaWatcher for HeadlessWatcher {
    fn media(&self) -> String {
        self.query.to_string()
    }

    fn matches(&self) -> bool {
        self.matches.get()
    }

    fn add_listener(&self, listener: MediaListener) {
        let mut listeners = self.listeners.borrow_mut();
        if !listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            listeners.push(listener);
        }
    }

    fn remove_listener(&self, listener: &MediaListener) {
        self.listeners
            .borrow_mut()
            .retain(|l| !Rc::ptr_eq(l, listener));
    }
}
