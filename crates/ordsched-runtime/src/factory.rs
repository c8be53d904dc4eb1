//! Worker factory — builds fresh workers on demand.

use crate::worker::NewWorker;
use ordsched_core::{EngineResult, WorkerId};
use std::marker::PhantomData;

/// Constructs worker instances, injecting a caller-supplied id plus the
/// shared construction arguments captured at factory-creation time.
///
/// The factory holds no id counter of its own — worker ids are supplied
/// by the caller ([`crate::pool::WorkerPool::add_workers`]), which is
/// what makes ids well-defined and monotonic across repeated
/// `add_workers` calls and across sessions.
pub struct WorkerFactory<W, Args> {
    args: Args,
    _worker: PhantomData<fn() -> W>,
}

impl<W, Args> WorkerFactory<W, Args>
where
    W: NewWorker<Args>,
    Args: Clone,
{
    /// Capture the shared construction arguments for every worker this
    /// factory will go on to build.
    pub fn new(args: Args) -> Self {
        Self { args, _worker: PhantomData }
    }

    /// Build a single fresh worker with the given id.
    pub fn build_new(&self, id: WorkerId) -> EngineResult<W> {
        W::new_worker(id, self.args.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordsched_core::EngineResult;

    struct Doubler {
        id: WorkerId,
        label: String,
    }

    impl NewWorker<String> for Doubler {
        fn new_worker(id: WorkerId, label: String) -> EngineResult<Self> {
            Ok(Doubler { id, label })
        }
    }

    #[test]
    fn build_new_injects_id_and_shared_args() {
        let factory: WorkerFactory<Doubler, String> = WorkerFactory::new("shared".to_string());
        let w0 = factory.build_new(WorkerId::new(0)).unwrap();
        let w1 = factory.build_new(WorkerId::new(1)).unwrap();

        assert_eq!(w0.id.as_u64(), 0);
        assert_eq!(w1.id.as_u64(), 1);
        assert_eq!(w0.label, "shared");
        assert_eq!(w1.label, "shared");
    }
}
