//! Releasing values that a running platform dispatch may still use.
//!
//! A listener can detach itself, or another listener of the same watcher,
//! while the platform is calling it. The backing closure must then stay alive
//! until the dispatch returns. [`Retired`] holds such values and drops them
//! the next time the watcher is touched with no dispatch in progress.
#![cfg_attr(not(all(target_arch = "wasm32", feature = "web")), allow(dead_code))]

use std::{
    cell::{Cell, RefCell},
    mem,
    rc::Rc,
};

/// Counts the dispatches currently running for one watcher.
#[derive(Clone, Default)]
pub(crate) struct DispatchDepth(Rc<Cell<usize>>);

impl DispatchDepth {
    /// Mark a dispatch as running until the returned scope is dropped.
    pub(crate) fn enter(&self) -> DispatchScope {
        self.0.set(self.0.get() + 1);
        DispatchScope(self.0.clone())
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.0.get() == 0
    }
}

pub(crate) struct DispatchScope(Rc<Cell<usize>>);

impl Drop for DispatchScope {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

/// Values detached from a watcher, waiting for its dispatches to finish.
pub(crate) struct Retired<T> {
    depth: DispatchDepth,
    items: RefCell<Vec<T>>,
}

impl<T> Retired<T> {
    pub(crate) fn new(depth: DispatchDepth) -> Self {
        Self {
            depth,
            items: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn retire(&self, item: T) {
        self.items.borrow_mut().push(item);
    }

    /// Drop the retired values unless a dispatch is running.
    pub(crate) fn collect(&self) {
        if !self.depth.is_idle() {
            return;
        }
        // dropped after the borrow ends, a value may run code on drop
        let items = mem::take(&mut *self.items.borrow_mut());
        drop(items);
    }

    pub(crate) fn len(&self) -> usize {
        self.items.borrow().len()
    }
}
