use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Trait for checking if computation should be cancelled
pub trait CancellationChecker: Clone {
    /// Returns true if computation should be cancelled
    fn is_cancelled(&self) -> bool;
}

/// Never cancels - for synchronous or non-cancellable contexts
#[derive(Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationChecker for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Monotonically increasing counter identifying the current render
/// generation. Advancing it marks every previously captured snapshot as
/// superseded. Cloned handles all observe the same counter.
#[derive(Clone, Debug, Default)]
pub struct Generation {
    counter: Arc<AtomicU64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    /// Start a new generation; returns the new value.
    /// Values only increase and are never reused.
    pub fn advance(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Capture the live value for work scheduled now.
    pub fn checker(&self) -> GenerationChecker {
        GenerationChecker {
            live: Arc::clone(&self.counter),
            snapshot: self.current(),
        }
    }
}

/// Compares a captured generation snapshot against the live counter.
///
/// Reads are Relaxed: a task that narrowly misses a fresh generation
/// finishes one extra checkpoint before noticing, which the best-effort
/// cancellation contract allows.
#[derive(Clone)]
pub struct GenerationChecker {
    live: Arc<AtomicU64>,
    snapshot: u64,
}

impl CancellationChecker for GenerationChecker {
    fn is_cancelled(&self) -> bool {
        self.live.load(Ordering::Relaxed) != self.snapshot
    }
}
