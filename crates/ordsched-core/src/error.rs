//! Error types for the scheduling engine.

use core::fmt;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the engine.
///
/// Generator exhaustion and generator failure are deliberately *not*
/// members here — the feeder coalesces both into the output sentinel and
/// never surfaces them as an `EngineError` (see the generator failure
/// handling note in the crate docs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A worker's `call` panicked while processing an item. Carries the
    /// panic payload formatted as a string, if one could be extracted.
    WorkerPanicked(String),

    /// A worker factory's `new_worker` failed.
    WorkerBuildFailed(String),

    /// A precondition described in the public API docs was violated
    /// (`launch` called twice concurrently, `pop` called after the
    /// sentinel, `get_workers` called mid-session). Only ever produced in
    /// debug builds via `debug_assert!`; release builds have unspecified
    /// behavior per the engine's documented misuse contract.
    PoolMisuse(&'static str),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::WorkerPanicked(msg) => write!(f, "worker panicked: {msg}"),
            EngineError::WorkerBuildFailed(msg) => write!(f, "failed to build worker: {msg}"),
            EngineError::PoolMisuse(what) => write!(f, "scheduler misuse: {what}"),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = EngineError::WorkerPanicked("boom".into());
        assert_eq!(format!("{e}"), "worker panicked: boom");
    }
}
