//! Bounded, blocking, thread-safe FIFO queue.
//!
//! Push and pop may be called from any thread. `pop` blocks while the
//! queue is empty; `push` blocks while the queue is at capacity (unless
//! capacity is `UNLIMITED`). One mutex, two condition variables — no
//! other synchronization primitive is used, and no lock is ever held
//! across a call into user code.

use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::{Condvar, Mutex};

/// Capacity value meaning "no maximum size". Must be zero: any positive
/// value is a real cap, including a cap of 1.
pub const UNLIMITED: usize = 0;

struct Inner<T> {
    queue: VecDeque<T>,
}

/// A thread-safe FIFO with an optional capacity cap.
///
/// Fairness between waiters is not guaranteed — each wakeup re-checks its
/// predicate, so spurious wakeups (and unfair wakeups) are harmless.
pub struct BoundedQueue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    max_size: usize,
}

impl<T> BoundedQueue<T> {
    /// Create a queue with the given capacity. `max_size = 0` (or
    /// [`UNLIMITED`]) means the queue never blocks on push.
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Mutex::new(Inner { queue: VecDeque::new() }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            max_size,
        }
    }

    /// Push an element onto the back of the queue, blocking while full.
    pub fn push(&self, value: T) {
        let mut inner = self.inner.lock().unwrap();
        while !self.has_room(&inner) {
            inner = self.not_full.wait(inner).unwrap();
        }
        inner.queue.push_back(value);
        self.not_empty.notify_one();
    }

    /// Pop the front element, blocking while empty.
    ///
    /// Only one task should call `pop` on a given queue if strict FIFO
    /// delivery to that task matters — concurrent poppers still see each
    /// element exactly once, but in no particular split between them.
    pub fn pop(&self) -> T {
        let mut inner = self.inner.lock().unwrap();
        while inner.queue.is_empty() {
            inner = self.not_empty.wait(inner).unwrap();
        }
        let value = inner.queue.pop_front().expect("checked non-empty above");
        self.not_full.notify_one();
        value
    }

    /// Current number of queued elements. Racy the instant it returns —
    /// diagnostic use only.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Read-only snapshot of the backing container.
    ///
    /// **Not thread-safe** in the sense of giving any cross-call
    /// consistency guarantee: it momentarily locks the queue to take the
    /// snapshot, but a concurrent push/pop from another task can make the
    /// view stale the instant this call returns. Use only when no other
    /// task is touching the queue — between sessions, for
    /// `QueueScheduler::get_workers`.
    pub fn peek_data(&self) -> Peek<'_, T> {
        Peek(self.inner.lock().unwrap())
    }

    fn has_room(&self, inner: &Inner<T>) -> bool {
        self.max_size == UNLIMITED || inner.queue.len() < self.max_size
    }
}

/// Read-only view into a [`BoundedQueue`]'s backing container.
pub struct Peek<'a, T>(std::sync::MutexGuard<'a, Inner<T>>);

impl<'a, T> Deref for Peek<'a, T> {
    type Target = VecDeque<T>;

    fn deref(&self) -> &VecDeque<T> {
        &self.0.queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn push_pop_preserves_order() {
        let q = BoundedQueue::new(UNLIMITED);
        for i in 0..5 {
            q.push(i);
        }
        for i in 0..5 {
            assert_eq!(q.pop(), i);
        }
    }

    #[test]
    fn push_blocks_when_full() {
        let q = Arc::new(BoundedQueue::new(2));
        q.push(1);
        q.push(2);

        let q2 = Arc::clone(&q);
        let handle = thread::spawn(move || {
            q2.push(3);
        });

        thread::sleep(Duration::from_millis(50));
        assert_eq!(q.len(), 2, "push should still be blocked");

        assert_eq!(q.pop(), 1);
        handle.join().unwrap();
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn pop_blocks_when_empty() {
        let q = Arc::new(BoundedQueue::<i32>::new(UNLIMITED));
        let q2 = Arc::clone(&q);

        let handle = thread::spawn(move || q2.pop());

        thread::sleep(Duration::from_millis(50));
        q.push(42);

        assert_eq!(handle.join().unwrap(), 42);
    }

    #[test]
    fn unlimited_never_blocks_push() {
        let q = BoundedQueue::new(UNLIMITED);
        for i in 0..10_000 {
            q.push(i);
        }
        assert_eq!(q.len(), 10_000);
    }

    #[test]
    fn peek_data_is_read_only_snapshot() {
        let q = BoundedQueue::new(UNLIMITED);
        q.push(1);
        q.push(2);
        let snapshot: Vec<_> = q.peek_data().iter().copied().collect();
        assert_eq!(snapshot, vec![1, 2]);
    }

    #[test]
    fn concurrent_producers_consumers_preserve_count() {
        let q = Arc::new(BoundedQueue::new(16));
        let producers: Vec<_> = (0..4)
            .map(|p| {
                let q = Arc::clone(&q);
                thread::spawn(move || {
                    for i in 0..250 {
                        q.push(p * 250 + i);
                    }
                })
            })
            .collect();

        let consumer_q = Arc::clone(&q);
        let consumer = thread::spawn(move || {
            let mut seen = Vec::with_capacity(1000);
            for _ in 0..1000 {
                seen.push(consumer_q.pop());
            }
            seen
        });

        for p in producers {
            p.join().unwrap();
        }
        let mut seen = consumer.join().unwrap();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 1000);
    }
}
