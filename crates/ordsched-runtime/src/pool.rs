//! Worker pool — a bounded queue of idle workers.

use crate::factory::WorkerFactory;
use crate::worker::NewWorker;
use ordsched_core::{BoundedQueue, EngineResult, Peek, WorkerId, WorkerIdGen};

/// Owns the set of workers the engine is allowed to hand out.
///
/// Materialized directly as a [`BoundedQueue`] of idle workers, capacity
/// equal to the pool's current size. The scheduler pops to borrow a
/// worker, a worker thread pushes to return it; because the queue is
/// bounded exactly to pool size, a return-push can never actually block,
/// but it still goes through the same blocking discipline as every other
/// queue operation — no special-cased fast path.
pub struct WorkerPool<W> {
    idle: BoundedQueue<(WorkerId, W)>,
    ids: WorkerIdGen,
    size: std::sync::atomic::AtomicUsize,
}

impl<W> WorkerPool<W> {
    pub fn new() -> Self {
        Self {
            idle: BoundedQueue::new(ordsched_core::UNLIMITED),
            ids: WorkerIdGen::new(),
            size: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Build `count` fresh workers from `factory` and add them to the
    /// idle queue, assigning each a monotonic [`WorkerId`]. Ids are never
    /// reused and keep incrementing across repeated calls, including
    /// across sessions.
    pub fn add_workers<Args>(&self, factory: &WorkerFactory<W, Args>, count: usize) -> EngineResult<()>
    where
        W: NewWorker<Args>,
        Args: Clone,
    {
        for _ in 0..count {
            let id = self.ids.next_id();
            let worker = factory.build_new(id)?;
            self.idle.push((id, worker));
        }
        self.size.fetch_add(count, std::sync::atomic::Ordering::Relaxed);
        Ok(())
    }

    /// Borrow an idle worker, blocking until one is available. Returns the
    /// worker's id alongside it so the caller can tag the thread that runs
    /// it (see `qlog::set_current_worker`) without the `Worker` trait
    /// itself needing to expose an id getter.
    pub fn checkout(&self) -> (WorkerId, W) {
        self.idle.pop()
    }

    /// Return a worker to the idle queue. Must be called before the
    /// corresponding item's deferred result is resolved (see
    /// `SchedulerTask`'s worker-thread body) — this is what guarantees
    /// the "no worker leak" invariant.
    pub fn checkin(&self, id: WorkerId, worker: W) {
        self.idle.push((id, worker));
    }

    /// Number of workers owned by the pool (idle + busy).
    pub fn size(&self) -> usize {
        self.size.load(std::sync::atomic::Ordering::Relaxed)
    }

    /// Snapshot of the idle workers, each paired with its id. Only
    /// meaningful between sessions — see [`BoundedQueue::peek_data`].
    pub fn peek_idle(&self) -> Peek<'_, (WorkerId, W)> {
        self.idle.peek_data()
    }
}

impl<W> Default for WorkerPool<W> {
    fn default() -> Self {
        Self::new()
    }
}
