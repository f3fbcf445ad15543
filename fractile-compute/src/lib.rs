pub mod cancellation;
pub mod engine;
pub mod error;
pub mod mandelbrot;
pub mod registry;
pub mod worker_pool;

pub use cancellation::{CancellationChecker, Generation, GenerationChecker, NeverCancel};
pub use engine::TileEngine;
pub use error::EngineError;
pub use mandelbrot::{compute_tile, escape_time, MAX_ITERATIONS};
pub use registry::{PendingResults, Registration, TileOutcome};
pub use worker_pool::WorkerPool;

// Re-export core types for convenience
pub use fractile_core::*;
