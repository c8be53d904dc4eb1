//! One-shot, mutex+condvar deferred result.
//!
//! A [`DeferredResult`] is handed to the consumer (via the output queue)
//! at the moment its worker thread is spawned, long before that thread
//! has actually produced a value. [`DeferredResult::get`] blocks until
//! the paired [`Resolver`] resolves it — this is the handle that lets
//! the scheduler publish results in dispatch order while the underlying
//! computations race to completion in any order.

use ordsched_core::EngineResult;
use std::sync::{Arc, Condvar, Mutex};

struct Slot<O> {
    value: Mutex<Option<EngineResult<O>>>,
    ready: Condvar,
}

/// Consumer-facing half of a deferred result. Resolves exactly once.
pub struct DeferredResult<O> {
    slot: Arc<Slot<O>>,
}

/// Producer-facing half; held by the worker thread that will resolve it.
pub struct Resolver<O> {
    slot: Arc<Slot<O>>,
}

/// Create a fresh deferred result / resolver pair.
pub fn deferred<O>() -> (Resolver<O>, DeferredResult<O>) {
    let slot = Arc::new(Slot { value: Mutex::new(None), ready: Condvar::new() });
    (Resolver { slot: Arc::clone(&slot) }, DeferredResult { slot })
}

impl<O> DeferredResult<O> {
    /// Block until the paired resolver has produced a value, then
    /// consume it. Consumes `self` — a `DeferredResult` resolves exactly
    /// once, by construction.
    pub fn get(self) -> EngineResult<O> {
        let mut guard = self.slot.value.lock().unwrap();
        loop {
            if let Some(value) = guard.take() {
                return value;
            }
            guard = self.slot.ready.wait(guard).unwrap();
        }
    }
}

impl<O> Resolver<O> {
    /// Resolve the paired deferred result and wake its waiter, if any.
    pub fn resolve(self, value: EngineResult<O>) {
        let mut guard = self.slot.value.lock().unwrap();
        *guard = Some(value);
        self.slot.ready.notify_all();
    }
}
