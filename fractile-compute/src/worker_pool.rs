//! Fixed-size thread pool with a shared FIFO job queue.
//!
//! Shutdown policy is drain-then-stop: workers finish every job queued
//! before the shutdown signal, then exit and are joined.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crate::error::EngineError;

type Job = Box<dyn FnOnce() + Send + 'static>;

struct QueueState {
    queue: VecDeque<Job>,
    shutting_down: bool,
}

/// Shared job queue with a condition variable for worker wake/sleep.
struct JobQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

impl JobQueue {
    fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                queue: VecDeque::new(),
                shutting_down: false,
            }),
            available: Condvar::new(),
        }
    }

    fn push(&self, job: Job) -> Result<(), EngineError> {
        let mut state = self.lock();
        if state.shutting_down {
            return Err(EngineError::ShutDown);
        }
        state.queue.push_back(job);
        drop(state);
        self.available.notify_one();
        Ok(())
    }

    /// Next job for a worker, blocking while the queue is empty.
    /// Returns None only once the queue is drained after shutdown.
    fn next_job(&self) -> Option<Job> {
        let mut state = self.lock();
        loop {
            if let Some(job) = state.queue.pop_front() {
                return Some(job);
            }
            if state.shutting_down {
                return None;
            }
            state = self
                .available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn signal_shutdown(&self) {
        self.lock().shutting_down = true;
        self.available.notify_all();
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // Jobs run outside the lock, so a panicking job cannot poison it;
        // recover the guard rather than cascade the panic.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fixed pool of worker threads consuming from a shared task queue.
///
/// Construction starts all threads immediately; the count is fixed for the
/// pool's lifetime. `schedule` never blocks the caller beyond brief lock
/// contention.
pub struct WorkerPool {
    jobs: Arc<JobQueue>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(threads: usize) -> Self {
        let threads = threads.max(1);
        let jobs = Arc::new(JobQueue::new());

        let workers = (0..threads)
            .map(|_| {
                let queue = Arc::clone(&jobs);
                thread::spawn(move || worker_loop(&queue))
            })
            .collect();

        Self { jobs, workers }
    }

    /// Enqueue one unit of work, FIFO relative to other scheduled tasks.
    /// Rejected cleanly once shutdown has been signalled.
    pub fn schedule<F>(&self, task: F) -> Result<(), EngineError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.jobs.push(Box::new(task))
    }

    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Drain remaining queued tasks, then stop and join every worker.
    /// Idempotent; also runs on drop.
    pub fn shutdown(&mut self) {
        self.jobs.signal_shutdown();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                log::warn!("worker thread panicked");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(jobs: &JobQueue) {
    while let Some(job) = jobs.next_job() {
        // A failing task must never take the worker thread down with it.
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            log::warn!("scheduled task panicked; worker continues");
        }
    }
}
