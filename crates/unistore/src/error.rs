use std::fmt;
use thiserror::Error;

/// Stage of a dispatch in progress, reported when a nested dispatch is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    /// The reducer is computing the next state.
    Reducing,
    /// Listeners are being notified of a committed state.
    Notifying,
}

impl fmt::Display for DispatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchPhase::Reducing => write!(f, "the reducer is running"),
            DispatchPhase::Notifying => write!(f, "listeners are being notified"),
        }
    }
}

/// Errors raised by the store itself.
///
/// Reducers and listeners report failure by panicking; those panics are
/// never caught and reach the caller of `dispatch` unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid construction arguments.
    #[error("Invalid store configuration: {0}")]
    Configuration(String),

    /// A dispatch was issued while another one on the same store was in progress.
    #[error("Nested dispatch refused while {0}")]
    ReentrantDispatch(DispatchPhase),

    /// Listeners queued more nested dispatches than the store allows.
    #[error("Dispatch queue is full ({limit} actions)")]
    QueueFull { limit: usize },

    /// Failure raised by application middleware, passed through as-is.
    #[error(transparent)]
    Middleware(#[from] anyhow::Error),
}
