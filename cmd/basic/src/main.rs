//! Doubles a stream of integers across a small worker pool and prints
//! the results in order.

use ordsched::{qinfo, EngineResult, NewWorker, QueueScheduler, Worker, WorkerId};

struct Doubler {
    id: WorkerId,
}

impl NewWorker<()> for Doubler {
    fn new_worker(id: WorkerId, _args: ()) -> EngineResult<Self> {
        Ok(Doubler { id })
    }
}

impl Worker<i32, i32> for Doubler {
    fn call(&mut self, input: i32) -> i32 {
        qinfo!("worker {:?} doubling {input}", self.id);
        input * 2
    }
}

fn main() {
    ordsched::init_logging();

    let mut scheduler: QueueScheduler<i32, i32, Doubler, ()> = QueueScheduler::new(());
    scheduler.add_workers(4).expect("failed to build workers");

    let mut next = 0;
    scheduler.launch(move || {
        if next < 20 {
            let value = next;
            next += 1;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    });

    while let Some(result) = scheduler.pop() {
        match result {
            Ok(output) => println!("{output}"),
            Err(e) => eprintln!("item failed: {e}"),
        }
    }
}
