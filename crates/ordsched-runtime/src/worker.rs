//! Worker and generator contracts.

use ordsched_core::{EngineResult, WorkerId};

/// A stateful, exclusively owned unit of work.
///
/// Calls to a single `Worker` are strictly serial — the engine never
/// invokes `call` on the same worker from two threads at once, so the
/// implementation need not be internally synchronized. A worker may be
/// invoked many times across its lifetime, including across sessions
/// (the pool is reused, not rebuilt, between `launch` calls).
pub trait Worker<Input, Output>: Send {
    fn call(&mut self, input: Input) -> Output;
}

/// Constructs a worker from its assigned id plus a fixed set of shared
/// construction arguments. Mirrors the `(id, shared_args...)` worker
/// constructor contract: `Args` stands in for the shared argument tuple.
pub trait NewWorker<Args>: Sized {
    fn new_worker(id: WorkerId, args: Args) -> EngineResult<Self>;
}

/// Outcome of asking the generator for the next input.
///
/// `Ok(Some(value))` is a produced item. `Ok(None)` and `Err(_)` are both
/// terminal and are treated identically by the feeder — the engine does
/// not distinguish ordinary end-of-stream from a failing generator in
/// the data path; the consumer observes the output sentinel either way.
pub type GenResult<Input> = Result<Option<Input>, GeneratorError>;

/// Opaque cause for a generator's terminal failure. The feeder logs it
/// (see `qwarn!` in `FeederTask::run`) but does not propagate it further.
#[derive(Debug, Clone)]
pub struct GeneratorError(pub String);

impl std::fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "generator failed: {}", self.0)
    }
}

impl std::error::Error for GeneratorError {}

/// A single-threaded source of inputs. Invoked only from the feeder
/// thread; need not be `Sync`, but must be `Send` to be handed off to
/// that thread at `launch` time.
pub trait Generator<Input>: Send {
    fn next(&mut self) -> GenResult<Input>;
}

/// Adapts any `FnMut() -> GenResult<Input>` closure into a [`Generator`].
impl<Input, F> Generator<Input> for F
where
    F: FnMut() -> GenResult<Input> + Send,
{
    fn next(&mut self) -> GenResult<Input> {
        self()
    }
}
