//! The platform capability breakpoints are built on.
//!
//! A [`MediaMatcher`] turns a [`MediaQuery`] into a live [`MediaWatcher`],
//! which knows whether the query currently holds and notifies listeners when
//! that changes. In a browser this is `window.matchMedia`; elsewhere the
//! [`HeadlessViewport`](crate::headless::HeadlessViewport) plays the part.

use std::rc::Rc;

use crate::{error::BreakpointError, query::MediaQuery};

/// The change notification delivered to watcher listeners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaQueryEvent {
    /// The match state after the change.
    pub matches: bool,
    /// The query text of the watcher that changed.
    pub media: String,
}

/// A listener attached to a [`MediaWatcher`].
///
/// Listeners are compared by identity, so keep a clone of the `Rc` around to
/// remove it again.
pub type MediaListener = Rc<dyn Fn(&MediaQueryEvent)>;

/// A live watcher over a single media query.
pub trait MediaWatcher {
    /// The query text this watcher evaluates.
    fn media(&self) -> String;

    /// The current match state.
    fn matches(&self) -> bool;

    /// Attach a change listener. Attaching the same listener twice has no
    /// effect.
    fn add_listener(&self, listener: MediaListener);

    /// Detach a listener previously passed to [`MediaWatcher::add_listener`].
    fn remove_listener(&self, listener: &MediaListener);
}

/// Creates watchers for media queries.
pub trait MediaMatcher {
    fn match_media(&self, query: &MediaQuery) -> Result<Rc<dyn MediaWatcher>, BreakpointError>;
}

impl<M: MediaMatcher + ?Sized> MediaMatcher for Rc<M> {
    fn match_media(&self, query: &MediaQuery) -> Result<Rc<dyn MediaWatcher>, BreakpointError> {
        (**self).match_media(query)
    }
}
