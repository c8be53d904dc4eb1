//! Feeder and scheduler tasks — the two coordinator threads that turn a
//! generator plus a worker pool into an ordered stream of results.

use crate::config::EngineConfig;
use crate::deferred::{deferred, DeferredResult};
use crate::pool::WorkerPool;
use crate::worker::{Generator, Worker};
use ordsched_core::{qerror, qinfo, qwarn, BoundedQueue, EngineError, EngineResult};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Everything spawned for a single `launch()` session: the output queue
/// the consumer pops from, the scheduler thread's handle (which has
/// already joined the feeder thread by the time it returns), and the
/// shared list of per-item worker-thread handles the session spawned.
pub struct Session<Output> {
    pub output_queue: Arc<BoundedQueue<Option<DeferredResult<Output>>>>,
    pub scheduler_handle: JoinHandle<()>,
    pub inflight: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

/// Drain and join every worker-thread handle currently recorded as
/// in-flight. Called once the output sentinel has been retrieved (so
/// every real item's deferred result — and hence every worker thread —
/// has necessarily already resolved) and again from the façade's `Drop`
/// as a safety net.
pub fn join_inflight(inflight: &Mutex<Vec<JoinHandle<()>>>) {
    let handles: Vec<_> = std::mem::take(&mut *inflight.lock().unwrap());
    for handle in handles {
        let _ = handle.join();
    }
}

/// Spawn the feeder thread, which drains `generator` into `input_queue`
/// until exhaustion, then pushes the null sentinel exactly once.
fn spawn_feeder<Input, G>(
    mut generator: G,
    input_queue: Arc<BoundedQueue<Option<Input>>>,
) -> JoinHandle<()>
where
    Input: Send + 'static,
    G: Generator<Input> + 'static,
{
    thread::Builder::new()
        .name("ordsched-feeder".into())
        .spawn(move || loop {
            match generator.next() {
                Ok(Some(item)) => input_queue.push(Some(item)),
                Ok(None) => {
                    qinfo!("feeder exhausted, posting sentinel");
                    input_queue.push(None);
                    break;
                }
                Err(e) => {
                    qwarn!("generator failed ({e}), treating as end of stream");
                    input_queue.push(None);
                    break;
                }
            }
        })
        .expect("failed to spawn feeder thread")
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked with a non-string payload".to_string()
    }
}

/// Spawn the scheduler thread (which immediately spawns its own feeder
/// thread) for one session.
///
/// Per item popped from the input queue: checkout an idle worker
/// (blocking if none are free), spawn a worker thread owning that
/// worker plus the input, and append `Some(deferred)` to the output
/// queue — synchronously, in input order, before the worker thread has
/// necessarily produced anything. This ordering is what gives the
/// consumer FIFO delivery despite out-of-order completion.
pub fn spawn_session<Input, Output, W, G>(
    generator: G,
    pool: Arc<WorkerPool<W>>,
    config: EngineConfig,
) -> Session<Output>
where
    Input: Send + 'static,
    Output: Send + 'static,
    W: Worker<Input, Output> + Send + 'static,
    G: Generator<Input> + Send + 'static,
{
    let input_queue = Arc::new(BoundedQueue::new(config.max_input_size));
    let output_queue: Arc<BoundedQueue<Option<DeferredResult<Output>>>> =
        Arc::new(BoundedQueue::new(config.max_output_size));
    let inflight: Arc<Mutex<Vec<JoinHandle<()>>>> = Arc::new(Mutex::new(Vec::new()));

    let scheduler_input_queue = Arc::clone(&input_queue);
    let scheduler_output_queue = Arc::clone(&output_queue);
    let scheduler_inflight = Arc::clone(&inflight);

    let scheduler_handle = thread::Builder::new()
        .name("ordsched-scheduler".into())
        .spawn(move || {
            let feeder_handle = spawn_feeder(generator, Arc::clone(&scheduler_input_queue));

            loop {
                match scheduler_input_queue.pop() {
                    Some(input) => {
                        let (worker_id, worker) = pool.checkout();
                        let (resolver, result) = deferred::<Output>();

                        let item_pool = Arc::clone(&pool);
                        let handle = thread::Builder::new()
                            .name("ordsched-worker-task".into())
                            .spawn(move || {
                                ordsched_core::qlog::set_current_worker(Some(worker_id.as_u64()));
                                let mut worker = worker;
                                let outcome: Result<Output, Box<dyn std::any::Any + Send>> =
                                    panic::catch_unwind(AssertUnwindSafe(|| worker.call(input)));

                                // Invariant 5: the worker returns to the
                                // pool before the deferred result is
                                // resolved, whether or not the call panicked.
                                item_pool.checkin(worker_id, worker);

                                let resolved: EngineResult<Output> = match outcome {
                                    Ok(output) => Ok(output),
                                    Err(payload) => {
                                        let msg = panic_message(&*payload);
                                        qerror!("worker panicked: {msg}");
                                        Err(EngineError::WorkerPanicked(msg))
                                    }
                                };
                                resolver.resolve(resolved);
                            })
                            .expect("failed to spawn worker thread");

                        scheduler_output_queue.push(Some(result));
                        scheduler_inflight.lock().unwrap().push(handle);
                    }
                    None => {
                        // Input exhausted: the feeder has already pushed
                        // its own sentinel as its very last action, so
                        // joining it here is effectively instantaneous
                        // and satisfies "Running -> Draining" cleanly.
                        let _ = feeder_handle.join();
                        qinfo!("input exhausted, posting output sentinel");
                        scheduler_output_queue.push(None);
                        break;
                    }
                }
            }
        })
        .expect("failed to spawn scheduler thread");

    Session { output_queue, scheduler_handle, inflight }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::WorkerFactory;
    use crate::worker::NewWorker;
    use ordsched_core::WorkerId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Doubler;
    impl NewWorker<()> for Doubler {
        fn new_worker(_id: WorkerId, _args: ()) -> EngineResult<Self> {
            Ok(Doubler)
        }
    }
    impl Worker<i32, i32> for Doubler {
        fn call(&mut self, input: i32) -> i32 {
            input * 2
        }
    }

    struct Panicker;
    impl NewWorker<()> for Panicker {
        fn new_worker(_id: WorkerId, _args: ()) -> EngineResult<Self> {
            Ok(Panicker)
        }
    }
    impl Worker<i32, i32> for Panicker {
        fn call(&mut self, input: i32) -> i32 {
            if input == 2 {
                panic!("bad input");
            }
            input
        }
    }

    fn counting_generator(max: i32) -> impl Generator<i32> {
        let counter = AtomicUsize::new(0);
        move || {
            let i = counter.fetch_add(1, Ordering::Relaxed) as i32;
            if i < max {
                Ok(Some(i))
            } else {
                Ok(None)
            }
        }
    }

    #[test]
    fn order_preserved_under_session() {
        let pool: Arc<WorkerPool<Doubler>> = Arc::new(WorkerPool::new());
        let factory: WorkerFactory<Doubler, ()> = WorkerFactory::new(());
        pool.add_workers(&factory, 1).unwrap();

        let session = spawn_session::<i32, i32, Doubler, _>(
            counting_generator(6),
            pool,
            EngineConfig::new(),
        );

        let mut outputs = Vec::new();
        loop {
            match session.output_queue.pop() {
                Some(deferred) => outputs.push(deferred.get().unwrap()),
                None => break,
            }
        }
        assert_eq!(outputs, vec![0, 2, 4, 6, 8, 10]);

        join_inflight(&session.inflight);
        session.scheduler_handle.join().unwrap();
        assert_eq!(pool.size(), 1);
        assert_eq!(pool.peek_idle().len(), 1);
    }

    #[test]
    fn worker_panic_surfaces_as_error_without_losing_the_worker() {
        let pool: Arc<WorkerPool<Panicker>> = Arc::new(WorkerPool::new());
        let factory: WorkerFactory<Panicker, ()> = WorkerFactory::new(());
        pool.add_workers(&factory, 1).unwrap();

        let session = spawn_session::<i32, i32, Panicker, _>(
            counting_generator(3),
            pool,
            EngineConfig::new(),
        );

        let mut results = Vec::new();
        loop {
            match session.output_queue.pop() {
                Some(deferred) => results.push(deferred.get()),
                None => break,
            }
        }

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());

        join_inflight(&session.inflight);
        session.scheduler_handle.join().unwrap();
        assert_eq!(pool.peek_idle().len(), 1);
    }

    #[test]
    fn empty_generator_yields_only_the_sentinel() {
        let pool: Arc<WorkerPool<Doubler>> = Arc::new(WorkerPool::new());
        let factory: WorkerFactory<Doubler, ()> = WorkerFactory::new(());
        pool.add_workers(&factory, 1).unwrap();

        let session = spawn_session::<i32, i32, Doubler, _>(
            counting_generator(0),
            pool,
            EngineConfig::new(),
        );

        assert!(session.output_queue.pop().is_none());
        join_inflight(&session.inflight);
        session.scheduler_handle.join().unwrap();
    }
}
