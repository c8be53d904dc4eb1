//! Throughput against pool size, with a worker whose cost is dominated
//! by a fixed sleep rather than CPU work — the scenario where adding
//! workers should translate directly into wall-clock speedup.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ordsched::{EngineResult, NewWorker, QueueScheduler, Worker, WorkerId};
use std::thread;
use std::time::Duration;

struct SleepWorker;

impl NewWorker<()> for SleepWorker {
    fn new_worker(_id: WorkerId, _args: ()) -> EngineResult<Self> {
        Ok(SleepWorker)
    }
}

impl Worker<i32, i32> for SleepWorker {
    fn call(&mut self, input: i32) -> i32 {
        thread::sleep(Duration::from_millis(2));
        input
    }
}

fn run_session(pool_size: usize, items: i32) {
    let mut scheduler: QueueScheduler<i32, i32, SleepWorker, ()> = QueueScheduler::new(());
    scheduler.add_workers(pool_size).unwrap();

    let mut next = 0;
    scheduler.launch(move || {
        if next < items {
            let value = next;
            next += 1;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    });

    while scheduler.pop().is_some() {}
}

fn pool_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_scaling");
    group.sample_size(20);

    for pool_size in [1usize, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(pool_size),
            &pool_size,
            |b, &pool_size| {
                b.iter(|| run_session(pool_size, 64));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, pool_scaling);
criterion_main!(benches);
