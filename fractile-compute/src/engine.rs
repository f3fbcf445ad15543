//! The parallel tile engine: worker pool + generation counter + pending
//! result registry behind one facade.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use fractile_core::{Tile, ViewParams};

use crate::cancellation::{CancellationChecker, Generation};
use crate::error::EngineError;
use crate::mandelbrot;
use crate::registry::{PendingResults, Registration, TileOutcome};
use crate::worker_pool::WorkerPool;

/// Parallelized Mandelbrot tile engine.
///
/// Submissions (`submit_tile_async`) may come from any thread. `poll` and
/// `reset` belong to the single consumer driving delivery - typically the
/// thread running the render loop - which the `&mut self` receivers
/// enforce.
pub struct TileEngine {
    pool: WorkerPool,
    generation: Generation,
    registration: Registration,
    results: PendingResults,
}

impl TileEngine {
    /// Engine with one worker per available CPU.
    pub fn new() -> Self {
        Self::with_threads(num_cpus::get())
    }

    pub fn with_threads(threads: usize) -> Self {
        let (registration, results) = PendingResults::new();
        Self {
            pool: WorkerPool::new(threads),
            generation: Generation::new(),
            registration,
            results,
        }
    }

    pub fn thread_count(&self) -> usize {
        self.pool.thread_count()
    }

    /// Discard all queued-but-undelivered results and start a new
    /// generation. In-flight tasks notice at their next checkpoint and
    /// stop; whatever they still send is never delivered.
    pub fn reset(&mut self) {
        self.results.clear();
        let generation = self.generation.advance();
        log::debug!("reset computations, generation {generation}");
    }

    /// Schedule a tile on the worker pool and register its eventual
    /// result with `on_done` as the delivery callback. Returns
    /// immediately; the result arrives through a later `poll`.
    pub fn submit_tile_async<F>(
        &self,
        view: ViewParams,
        tile: Tile,
        on_done: F,
    ) -> Result<(), EngineError>
    where
        F: FnOnce(TileOutcome) + Send + 'static,
    {
        let (result_tx, result_rx) = crossbeam_channel::bounded(1);
        let checker = self.generation.checker();

        self.pool.schedule(move || {
            let outcome = run_tile_task(&checker, &view, &tile);
            // The registry may already be gone; delivery is best-effort
            let _ = result_tx.send(outcome);
        })?;

        if !self.registration.register(result_rx, on_done) {
            return Err(EngineError::ShutDown);
        }
        Ok(())
    }

    /// Compute a tile on the calling thread and invoke `on_done`
    /// synchronously with the result. The current generation still
    /// applies: a concurrent reset can abort the tile at a column
    /// boundary like any other.
    pub fn submit_tile_sync<F>(&self, view: ViewParams, tile: Tile, on_done: F)
    where
        F: FnOnce(TileOutcome),
    {
        let checker = self.generation.checker();
        let buffer = mandelbrot::compute_tile(&checker, &view, &tile);
        on_done(TileOutcome::Computed(buffer));
    }

    /// Deliver at most one ready result; see
    /// [`PendingResults::poll`](crate::registry::PendingResults::poll).
    /// Returns whether a callback was invoked.
    pub fn poll(&mut self) -> bool {
        self.results.poll()
    }

    /// Drain queued work, join every worker thread and drop undelivered
    /// results. Consumers must treat teardown as "delivery not
    /// guaranteed".
    pub fn shutdown(mut self) {
        self.pool.shutdown();
        self.results.clear();
        log::debug!("tile engine shut down");
    }
}

impl Default for TileEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute one tile, converting a panic into a tagged failure so the
/// outcome always reaches the registry and the worker thread survives.
fn run_tile_task<C: CancellationChecker>(
    checker: &C,
    view: &ViewParams,
    tile: &Tile,
) -> TileOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| {
        mandelbrot::compute_tile(checker, view, tile)
    })) {
        Ok(buffer) => TileOutcome::Computed(buffer),
        Err(payload) => TileOutcome::Failed(panic_message(&payload)),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "tile task panicked".to_string()
    }
}
