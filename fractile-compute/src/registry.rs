//! Pending-result registry: ordered (future result, callback) pairs polled
//! by a single consumer.

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use fractile_core::IterationBuffer;

/// Tagged result of one scheduled tile computation.
///
/// A tile aborted by a generation change is still `Computed` - its buffer
/// simply holds only the column prefix that was written. `Failed` carries
/// the panic message of a task that died while computing.
#[derive(Debug)]
pub enum TileOutcome {
    Computed(IterationBuffer),
    Failed(String),
}

type OnTileDone = Box<dyn FnOnce(TileOutcome) + Send + 'static>;

/// One in-flight tile: the receiving half of its result handoff plus the
/// callback to invoke on delivery.
pub struct PendingTile {
    result: Receiver<TileOutcome>,
    on_done: OnTileDone,
}

/// Submission-side handle; cloneable and usable from any thread.
#[derive(Clone)]
pub struct Registration {
    sender: Sender<PendingTile>,
}

impl Registration {
    /// Append an entry to the registry. Returns false if the consuming
    /// side has been torn down.
    pub fn register<F>(&self, result: Receiver<TileOutcome>, on_done: F) -> bool
    where
        F: FnOnce(TileOutcome) + Send + 'static,
    {
        self.sender
            .send(PendingTile {
                result,
                on_done: Box::new(on_done),
            })
            .is_ok()
    }
}

/// Ordered collection of in-flight results, drained one per poll.
///
/// Registrations arrive through a channel so any thread may submit, but
/// polling is single-consumer by construction: `PendingResults` is not
/// `Clone` and `poll` takes `&mut self`.
pub struct PendingResults {
    incoming: Receiver<PendingTile>,
    entries: Vec<PendingTile>,
}

impl PendingResults {
    pub fn new() -> (Registration, Self) {
        let (sender, incoming) = crossbeam_channel::unbounded();
        (
            Registration { sender },
            Self {
                incoming,
                entries: Vec::new(),
            },
        )
    }

    /// Move newly registered entries into the scan list, preserving
    /// registration order.
    fn absorb_registrations(&mut self) {
        while let Ok(pending) = self.incoming.try_recv() {
            self.entries.push(pending);
        }
    }

    /// Deliver at most one ready result.
    ///
    /// Scans entries in registration order and invokes the callback of the
    /// first one whose result is available, removing it. One delivery per
    /// call regardless of how many are ready - the consumer's own tick
    /// rate throttles delivery, and a backlog takes repeated calls to
    /// drain. Non-blocking in every case.
    pub fn poll(&mut self) -> bool {
        self.absorb_registrations();

        let mut index = 0;
        while index < self.entries.len() {
            match self.entries[index].result.try_recv() {
                Ok(outcome) => {
                    let entry = self.entries.remove(index);
                    if let TileOutcome::Failed(reason) = &outcome {
                        log::warn!("tile computation failed: {reason}");
                    }
                    (entry.on_done)(outcome);
                    return true;
                }
                Err(TryRecvError::Empty) => index += 1,
                Err(TryRecvError::Disconnected) => {
                    // The task was dropped without producing an outcome;
                    // its callback can never fire.
                    log::warn!("tile task vanished without a result");
                    self.entries.remove(index);
                }
            }
        }

        false
    }

    /// Drop every pending entry without invoking callbacks.
    pub fn clear(&mut self) {
        self.absorb_registrations();
        let dropped = self.entries.len();
        self.entries.clear();
        if dropped > 0 {
            log::debug!("dropped {dropped} pending tile results");
        }
    }

    pub fn pending_count(&mut self) -> usize {
        self.absorb_registrations();
        self.entries.len()
    }
}
