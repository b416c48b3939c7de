use std::{cell::RefCell, rc::Rc};

use rustc_hash::FxHashMap;

use crate::{
    breakpoint::{Breakpoint, BreakpointDefinition},
    error::BreakpointError,
    media::MediaMatcher,
};

thread_local! {
    static GLOBAL: RefCell<Option<Breakpoints>> = const { RefCell::new(None) };
}

/// The breakpoint registry.
///
/// Holds the named breakpoints defined so far and the [`MediaMatcher`] used
/// to create their watchers. The handle is cheap to clone; clones share the
/// same registry.
///
/// Most applications use the per-thread instance through the free functions
/// ([`define`], [`get`](crate::get), [`on`](crate::on), ...), installed with
/// [`init`]. Owning a `Breakpoints` directly is useful when several
/// independent registries are needed, or in tests.
#[derive(Clone)]
pub struct Breakpoints {
    inner: Rc<Registry>,
}

struct Registry {
    matcher: Box<dyn MediaMatcher>,
    /// `None` until the first call to `define`.
    entries: RefCell<Option<FxHashMap<String, Rc<Breakpoint>>>>,
    /// Replaced breakpoints that still had callbacks attached.
    orphaned: RefCell<Vec<Rc<Breakpoint>>>,
}

impl Breakpoints {
    pub fn new(matcher: impl MediaMatcher + 'static) -> Self {
        Self {
            inner: Rc::new(Registry {
                matcher: Box::new(matcher),
                entries: RefCell::new(None),
                orphaned: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Define or replace breakpoints.
    ///
    /// Each definition is normalized and backed by a fresh watcher, then
    /// merged into the registry: names already present are replaced, other
    /// names are left untouched. Callbacks attached to a replaced breakpoint
    /// are not moved to the new one: they stay on the old watcher, which is
    /// kept alive with the registry, so they keep firing for the old range
    /// and can no longer be detached by name.
    pub fn define<I, N>(&self, definitions: I)
    where
        I: IntoIterator<Item = (N, BreakpointDefinition)>,
        N: Into<String>,
    {
        // build outside of the borrow, the matcher is foreign code
        let built: Vec<(String, Rc<Breakpoint>)> = definitions
            .into_iter()
            .map(|(name, definition)| {
                let name = name.into();
                let breakpoint = Breakpoint::build(name.clone(), &definition, &*self.inner.matcher);
                tracing::debug!(
                    breakpoint = %name,
                    min = breakpoint.min(),
                    max = %breakpoint.max(),
                    watcher = breakpoint.media().is_some(),
                    "defined breakpoint"
                );
                (name, Rc::new(breakpoint))
            })
            .collect();

        let mut entries = self.inner.entries.borrow_mut();
        let entries = entries.get_or_insert_with(FxHashMap::default);
        let mut orphaned = self.inner.orphaned.borrow_mut();
        for (name, breakpoint) in built {
            if let Some(old) = entries.insert(name, breakpoint)
                && old.has_subscriptions()
            {
                tracing::debug!(breakpoint = old.name(), "replaced breakpoint keeps its callbacks");
                orphaned.push(old);
            }
        }
    }

    /// Whether `define` has been called on this registry.
    pub fn is_initialized(&self) -> bool {
        self.inner.entries.borrow().is_some()
    }

    /// The names of all defined breakpoints, sorted.
    pub fn names(&self) -> Vec<String> {
        let entries = self.inner.entries.borrow();
        let mut names: Vec<String> = entries
            .iter()
            .flat_map(|entries| entries.keys().cloned())
            .collect();
        names.sort();
        names
    }

    /// The breakpoints the viewport is currently inside, sorted by name.
    pub fn matched(&self) -> Vec<Rc<Breakpoint>> {
        let mut matched: Vec<Rc<Breakpoint>> = self
            .inner
            .entries
            .borrow()
            .iter()
            .flat_map(|entries| entries.values())
            .filter(|breakpoint| breakpoint.is_matched())
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name().cmp(b.name()));
        matched
    }

    /// Number of replaced breakpoints kept alive for their callbacks.
    pub fn orphaned(&self) -> usize {
        self.inner.orphaned.borrow().len()
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<Rc<Breakpoint>> {
        self.inner
            .entries
            .borrow()
            .as_ref()
            .and_then(|entries| entries.get(name).cloned())
    }

    /// Whether both handles point at the same registry.
    pub fn ptr_eq(&self, other: &Breakpoints) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Install the registry for the current thread.
///
/// Fails with [`BreakpointError::AlreadyInitialized`] if one is installed
/// already, including one installed lazily by the web backend.
pub fn init(matcher: impl MediaMatcher + 'static) -> Result<Breakpoints, BreakpointError> {
    GLOBAL.with(|global| {
        let mut global = global.borrow_mut();
        if global.is_some() {
            return Err(BreakpointError::AlreadyInitialized);
        }
        let breakpoints = Breakpoints::new(matcher);
        *global = Some(breakpoints.clone());
        Ok(breakpoints)
    })
}

/// The registry of the current thread, if any.
///
/// On the web the registry is created on first use, backed by
/// `window.matchMedia`.
pub fn global() -> Option<Breakpoints> {
    GLOBAL.with(|global| {
        let mut global = global.borrow_mut();
        if global.is_none() {
            *global = default_registry();
        }
        global.clone()
    })
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn default_registry() -> Option<Breakpoints> {
    match crate::web::WindowMatcher::new() {
        Ok(matcher) => Some(Breakpoints::new(matcher)),
        Err(err) => {
            tracing::warn!("no breakpoint registry: {err}");
            None
        }
    }
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn default_registry() -> Option<Breakpoints> {
    None
}

/// Define or replace breakpoints on the thread's registry.
///
/// See [`Breakpoints::define`].
pub fn define<I, N>(definitions: I)
where
    I: IntoIterator<Item = (N, BreakpointDefinition)>,
    N: Into<String>,
{
    match global() {
        Some(breakpoints) => breakpoints.define(definitions),
        None => tracing::warn!("breakpoints defined before `init`, ignoring"),
    }
}
