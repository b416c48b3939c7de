use thiserror::Error;

/// Errors surfaced by the few fallible entry points of the crate.
///
/// Registry operations themselves never fail on caller input: malformed
/// definitions are defaulted and unknown names read as absent. Only
/// installing the global registry, talking to the platform, and loading
/// configuration can go wrong.
#[derive(Debug, Error)]
pub enum BreakpointError {
    #[error("the breakpoint registry for this thread is already initialized")]
    AlreadyInitialized,
    #[error("the platform could not evaluate media query `{query}`: {reason}")]
    MatchMedia { query: String, reason: String },
    #[cfg(feature = "serde")]
    #[error("invalid breakpoint configuration")]
    Config(#[from] serde_json::Error),
}
