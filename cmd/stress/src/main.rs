//! Demonstrates backpressure: a bounded input queue paired with a slow
//! worker forces the feeder to block rather than buffer the whole
//! stream in memory.
//!
//! Run with `ORDSCHED_LOG_LEVEL=4` to see the feeder and scheduler
//! threads interleave.

use ordsched::{EngineConfig, EngineResult, NewWorker, QueueScheduler, Worker, WorkerId};
use std::thread;
use std::time::{Duration, Instant};

struct SlowWorker;

impl NewWorker<()> for SlowWorker {
    fn new_worker(_id: WorkerId, _args: ()) -> EngineResult<Self> {
        Ok(SlowWorker)
    }
}

impl Worker<i32, i32> for SlowWorker {
    fn call(&mut self, input: i32) -> i32 {
        thread::sleep(Duration::from_millis(30));
        input
    }
}

fn main() {
    ordsched::init_logging();

    // A 4-deep input queue against one worker: the feeder will fill it
    // almost instantly, then block on every subsequent push until the
    // worker drains an item.
    let config = EngineConfig::new().max_input_size(4).max_output_size(4);
    let mut scheduler: QueueScheduler<i32, i32, SlowWorker, ()> =
        QueueScheduler::with_config((), config);
    scheduler.add_workers(1).expect("failed to build workers");

    let total = 30;
    let mut next = 0;
    scheduler.launch(move || {
        if next < total {
            let value = next;
            next += 1;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    });

    let start = Instant::now();
    let mut count = 0;
    while let Some(result) = scheduler.pop() {
        let output = result.expect("worker never panics in this demo");
        count += 1;
        println!("t={:>5}ms item={output}", start.elapsed().as_millis());
    }
    println!("drained {count} items through a pool of 1 with a 4-deep queue");
}
