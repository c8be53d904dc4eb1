//! # ordsched
//!
//! Order-preserving parallel job scheduler.
//!
//! Feed a stream of inputs through a fixed pool of stateful workers,
//! each running on its own OS thread, and get the outputs back in
//! exactly the order the inputs were produced — regardless of which
//! worker finishes first.
//!
//! ## Quick start
//!
//! ```ignore
//! use ordsched::{QueueScheduler, Worker, NewWorker, EngineResult, WorkerId};
//!
//! struct Doubler;
//!
//! impl NewWorker<()> for Doubler {
//!     fn new_worker(_id: WorkerId, _args: ()) -> EngineResult<Self> {
//!         Ok(Doubler)
//!     }
//! }
//!
//! impl Worker<i32, i32> for Doubler {
//!     fn call(&mut self, input: i32) -> i32 {
//!         input * 2
//!     }
//! }
//!
//! let mut scheduler: QueueScheduler<i32, i32, Doubler, ()> = QueueScheduler::new(());
//! scheduler.add_workers(4).unwrap();
//!
//! let mut next = 0;
//! scheduler.launch(move || {
//!     if next < 10 {
//!         let v = next;
//!         next += 1;
//!         Ok(Some(v))
//!     } else {
//!         Ok(None)
//!     }
//! });
//!
//! while let Some(result) = scheduler.pop() {
//!     println!("{}", result.unwrap());
//! }
//! ```

pub use ordsched_core::{
    qdebug, qerror, qinfo, qtrace, qwarn, BoundedQueue, EngineError, EngineResult, Peek, WorkerId,
    WorkerIdGen,
};
pub use ordsched_core::qlog::{init as init_logging, set_log_level, LogLevel};

pub use ordsched_runtime::{
    EngineConfig, GenResult, Generator, GeneratorError, NewWorker, Worker, WorkerFactory,
    WorkerPool,
};

use ordsched_runtime::{join_inflight, spawn_session, Session};
use std::marker::PhantomData;
use std::sync::Arc;

/// Public façade over the feeder/scheduler machinery in `ordsched-runtime`.
///
/// Owns a worker pool (populated once, before the first [`launch`](Self::launch))
/// and, at most, one active session. A session runs from [`launch`](Self::launch)
/// until [`pop`](Self::pop) has returned the output sentinel (`None`); a fresh
/// session can then be launched, reusing the same pool and its workers.
///
/// Not safe to call [`add_workers`](Self::add_workers), [`launch`](Self::launch)
/// or [`get_workers`](Self::get_workers) concurrently from multiple threads, and
/// not safe to call them while a session is running except `pop` itself — this
/// mirrors the single-producer, single-consumer shape of the original design.
pub struct QueueScheduler<Input, Output, W, Args> {
    pool: Arc<WorkerPool<W>>,
    factory: WorkerFactory<W, Args>,
    config: EngineConfig,
    session: Option<Session<Output>>,
    _marker: PhantomData<fn(Input) -> Output>,
}

impl<Input, Output, W, Args> QueueScheduler<Input, Output, W, Args>
where
    W: NewWorker<Args> + Worker<Input, Output> + Send + 'static,
    Args: Clone,
    Input: Send + 'static,
    Output: Send + 'static,
{
    /// Build a scheduler with the given shared worker-construction
    /// arguments and configuration read from the environment (see
    /// [`EngineConfig::from_env`]).
    pub fn new(args: Args) -> Self {
        Self::with_config(args, EngineConfig::from_env())
    }

    /// Build a scheduler with explicit configuration.
    pub fn with_config(args: Args, config: EngineConfig) -> Self {
        Self {
            pool: Arc::new(WorkerPool::new()),
            factory: WorkerFactory::new(args),
            config,
            session: None,
            _marker: PhantomData,
        }
    }

    /// Build and add `count` fresh workers to the pool.
    ///
    /// Valid before the first [`launch`](Self::launch) and again between
    /// sessions; calling it while a session is running is a precondition
    /// violation.
    pub fn add_workers(&self, count: usize) -> EngineResult<()> {
        debug_assert!(self.session.is_none(), "add_workers called while a session is running");
        self.pool.add_workers(&self.factory, count)
    }

    /// Start a session: spawn the scheduler thread (which spawns its own
    /// feeder thread) to drain `generator` through the pool. Returns
    /// immediately; results are retrieved with [`pop`](Self::pop).
    ///
    /// Calling `launch` while a session is already active is a
    /// precondition violation.
    pub fn launch<G>(&mut self, generator: G)
    where
        G: Generator<Input> + Send + 'static,
    {
        debug_assert!(self.session.is_none(), "launch called while a session is already running");
        let session =
            spawn_session::<Input, Output, W, G>(generator, Arc::clone(&self.pool), self.config);
        self.session = Some(session);
    }

    /// Pop the next result, in input order.
    ///
    /// `None` marks end of the session: every worker that was ever
    /// checked out for it has been checked back in and every per-item
    /// thread it spawned has been joined by the time this call returns.
    /// A fresh session may be launched right after.
    ///
    /// Calling `pop` with no active session (before the first `launch`,
    /// or after a session has already yielded its sentinel) is a
    /// precondition violation.
    pub fn pop(&mut self) -> Option<EngineResult<Output>> {
        let session = self.session.as_ref().expect("pop called with no active session");
        match session.output_queue.pop() {
            Some(deferred) => Some(deferred.get()),
            None => {
                let session = self.session.take().expect("session checked above");
                join_inflight(&session.inflight);
                let _ = session.scheduler_handle.join();
                None
            }
        }
    }

    /// Snapshot the idle workers in the pool, each paired with its id.
    ///
    /// Only meaningful between sessions (see [`Peek`]'s caveats and
    /// [`BoundedQueue::peek_data`]); calling it mid-session is a
    /// precondition violation.
    pub fn get_workers(&self) -> Peek<'_, (WorkerId, W)> {
        debug_assert!(self.session.is_none(), "get_workers called during an active session");
        self.pool.peek_idle()
    }

    /// Number of workers the pool owns (idle + busy).
    pub fn worker_count(&self) -> usize {
        self.pool.size()
    }
}

impl<Input, Output, W, Args> Drop for QueueScheduler<Input, Output, W, Args> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            join_inflight(&session.inflight);
            let _ = session.scheduler_handle.join();
        }
    }
}
