//! Browser backend on top of `window.matchMedia`.

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{MediaQueryList, MediaQueryListEvent};

use crate::{
    dispatch::{DispatchDepth, Retired},
    error::BreakpointError,
    media::{MediaListener, MediaMatcher, MediaQueryEvent, MediaWatcher},
    query::MediaQuery,
};

type JsListener = Closure<dyn FnMut(MediaQueryListEvent)>;

/// Creates watchers with `window.matchMedia`.
pub struct WindowMatcher {
    window: web_sys::Window,
}

impl WindowMatcher {
    pub fn new() -> Result<Self, BreakpointError> {
        let window = web_sys::window().ok_or_else(|| BreakpointError::MatchMedia {
            query: String::new(),
            reason: "no global `window`".to_string(),
        })?;
        Ok(Self { window })
    }
}

impl MediaMatcher for WindowMatcher {
    fn match_media(&self, query: &MediaQuery) -> Result<Rc<dyn MediaWatcher>, BreakpointError> {
        let text = query.to_string();
        let list = self
            .window
            .match_media(&text)
            .map_err(|err| match_media_error(&text, &err))?
            .ok_or_else(|| BreakpointError::MatchMedia {
                query: text.clone(),
                reason: "matchMedia returned null".to_string(),
            })?;
        let depth = DispatchDepth::default();
        Ok(Rc::new(WindowWatcher {
            list,
            listeners: RefCell::new(Vec::new()),
            retired: Retired::new(depth.clone()),
            depth,
        }))
    }
}

fn match_media_error(query: &str, err: &JsValue) -> BreakpointError {
    BreakpointError::MatchMedia {
        query: query.to_string(),
        reason: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}

/// A `MediaQueryList` together with the closures registered on it.
///
/// The closures must outlive their registration, so they are kept here and
/// unregistered when the watcher is dropped. A removed closure may still be
/// running, so it is retired and dropped on the next `add_listener` or
/// `remove_listener` made outside of a dispatch.
pub struct WindowWatcher {
    list: MediaQueryList,
    listeners: RefCell<Vec<(MediaListener, JsListener)>>,
    depth: DispatchDepth,
    retired: Retired<JsListener>,
}

impl MediaWatcher for WindowWatcher {
    fn media(&self) -> String {
        self.list.media()
    }

    fn matches(&self) -> bool {
        self.list.matches()
    }

    fn add_listener(&self, listener: MediaListener) {
        self.retired.collect();
        let mut listeners = self.listeners.borrow_mut();
        if listeners.iter().any(|(l, _)| Rc::ptr_eq(l, &listener)) {
            return;
        }
        let closure: JsListener = Closure::new({
            let listener = listener.clone();
            let depth = self.depth.clone();
            move |event: MediaQueryListEvent| {
                let _scope = depth.enter();
                listener(&MediaQueryEvent {
                    matches: event.matches(),
                    media: event.media(),
                });
            }
        });
        if let Err(err) = self
            .list
            .add_listener_with_opt_callback(Some(closure.as_ref().unchecked_ref()))
        {
            tracing::warn!(media = %self.list.media(), "addListener failed: {err:?}");
            return;
        }
        listeners.push((listener, closure));
    }

    fn remove_listener(&self, listener: &MediaListener) {
        self.retired.collect();
        let mut listeners = self.listeners.borrow_mut();
        let (removed, kept): (Vec<_>, Vec<_>) = listeners
            .drain(..)
            .partition(|(l, _)| Rc::ptr_eq(l, listener));
        *listeners = kept;
        for (_, closure) in removed {
            unregister(&self.list, &closure);
            self.retired.retire(closure);
        }
    }
}

impl Drop for WindowWatcher {
    fn drop(&mut self) {
        for (_, closure) in self.listeners.get_mut().drain(..) {
            unregister(&self.list, &closure);
        }
    }
}

fn unregister(list: &MediaQueryList, closure: &JsListener) {
    if let Err(err) = list.remove_listener_with_opt_callback(Some(closure.as_ref().unchecked_ref()))
    {
        tracing::warn!(media = %list.media(), "removeListener failed: {err:?}");
    }
}
