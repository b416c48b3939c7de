//! Reading breakpoints and reacting to them.

use std::{fmt, rc::Rc};

use smallvec::SmallVec;

use crate::{
    breakpoint::{Breakpoint, BreakpointField, FieldValue},
    media::{MediaListener, MediaQueryEvent},
    registry::{Breakpoints, global},
};

/// A callback fired when the viewport enters a breakpoint.
///
/// It receives the change event, or `None` when fired immediately from
/// [`Breakpoints::on`], and the breakpoint itself. The watcher is available
/// through [`Breakpoint::media`].
///
/// Callbacks are identified by reference: keep a clone to pass to
/// [`Breakpoints::off`].
#[derive(Clone)]
pub struct BreakpointCallback(Rc<dyn Fn(Option<&MediaQueryEvent>, &Breakpoint)>);

impl BreakpointCallback {
    pub fn new(f: impl Fn(Option<&MediaQueryEvent>, &Breakpoint) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: Option<&MediaQueryEvent>, breakpoint: &Breakpoint) {
        (self.0)(event, breakpoint)
    }

    pub fn ptr_eq(&self, other: &BreakpointCallback) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for BreakpointCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BreakpointCallback")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

impl Breakpoints {
    /// The breakpoint called `name`.
    ///
    /// `None` if nothing has been defined yet or no breakpoint has that name.
    pub fn get(&self, name: &str) -> Option<Rc<Breakpoint>> {
        self.lookup(name)
    }

    /// A single field of the breakpoint called `name`.
    pub fn get_field(&self, name: &str, field: BreakpointField) -> Option<FieldValue> {
        self.lookup(name).map(|breakpoint| breakpoint.field(field))
    }

    /// Call `callback` whenever the viewport enters the breakpoint, and right
    /// away if it is inside it already.
    ///
    /// Same as [`Breakpoints::subscribe`] with `immediate` set.
    pub fn on(&self, name: &str, callback: &BreakpointCallback) {
        self.subscribe(name, callback, true);
    }

    /// Attach `callback` to the watcher of the breakpoint called `name`.
    ///
    /// The callback runs on every change notification of the watcher while
    /// the breakpoint is matched; leaving the range is not reported. With
    /// `immediate` set and the breakpoint matched, it also runs once before
    /// this returns, without an event.
    ///
    /// Unknown names and breakpoints without watcher are ignored.
    pub fn subscribe(&self, name: &str, callback: &BreakpointCallback, immediate: bool) {
        let Some(breakpoint) = self.lookup(name) else {
            tracing::debug!(breakpoint = name, "subscribe to unknown breakpoint ignored");
            return;
        };
        let Some(media) = breakpoint.media().cloned() else {
            tracing::debug!(breakpoint = name, "breakpoint has no watcher, subscribe ignored");
            return;
        };

        // the watcher is owned by the breakpoint, don't let it own it back
        let weak = Rc::downgrade(&breakpoint);
        let listener: MediaListener = Rc::new({
            let callback = callback.clone();
            move |event: &MediaQueryEvent| {
                let Some(breakpoint) = weak.upgrade() else {
                    return;
                };
                if breakpoint.is_matched() {
                    tracing::trace!(breakpoint = breakpoint.name(), "breakpoint entered");
                    callback.call(Some(event), &breakpoint);
                }
            }
        });
        media.add_listener(listener.clone());
        breakpoint
            .subscriptions
            .borrow_mut()
            .push((callback.clone(), listener));

        if immediate && breakpoint.is_matched() {
            tracing::trace!(breakpoint = name, "breakpoint matched on subscribe");
            callback.call(None, &breakpoint);
        }
    }

    /// Detach `callback` from the breakpoint called `name`.
    ///
    /// Every registration of this exact callback is removed. Unknown names,
    /// breakpoints without watcher and callbacks never attached are ignored.
    pub fn off(&self, name: &str, callback: &BreakpointCallback) {
        let Some(breakpoint) = self.lookup(name) else {
            return;
        };
        let Some(media) = breakpoint.media() else {
            return;
        };

        let removed: SmallVec<[_; 2]> = {
            let mut subscriptions = breakpoint.subscriptions.borrow_mut();
            let (removed, kept) = subscriptions
                .drain(..)
                .partition(|(registered, _)| registered.ptr_eq(callback));
            *subscriptions = kept;
            removed
        };
        for (_, listener) in &removed {
            media.remove_listener(listener);
        }
        tracing::debug!(
            breakpoint = name,
            removed = removed.len(),
            "callback detached"
        );
    }
}

/// The breakpoint called `name` in the thread's registry.
pub fn get(name: &str) -> Option<Rc<Breakpoint>> {
    global().and_then(|breakpoints| breakpoints.get(name))
}

/// A single field of the breakpoint called `name` in the thread's registry.
pub fn get_field(name: &str, field: BreakpointField) -> Option<FieldValue> {
    global().and_then(|breakpoints| breakpoints.get_field(name, field))
}

/// See [`Breakpoints::on`].
pub fn on(name: &str, callback: &BreakpointCallback) {
    if let Some(breakpoints) = global() {
        breakpoints.on(name, callback);
    }
}

/// See [`Breakpoints::subscribe`].
pub fn subscribe(name: &str, callback: &BreakpointCallback, immediate: bool) {
    if let Some(breakpoints) = global() {
        breakpoints.subscribe(name, callback, immediate);
    }
}

/// See [`Breakpoints::off`].
pub fn off(name: &str, callback: &BreakpointCallback) {
    if let Some(breakpoints) = global() {
        breakpoints.off(name, callback);
    }
}
