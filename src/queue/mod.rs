//! Bounded blocking queue: the shared-memory transport.
//!
//! A fixed-capacity FIFO shared between exactly one producer and any number
//! of consumers. All waiting is block-and-wake through condition variables;
//! nothing polls. A one-shot completion signal drains the queue cleanly:
//! consumers keep receiving until the queue is empty *and* the producer has
//! signaled completion, and only then observe end-of-work.
//!
//! ## Protocol
//!
//! - [`Producer::push`] blocks while the queue is full, then inserts at the
//!   tail and wakes one waiting consumer.
//! - [`Consumer::pop`] blocks while the queue is empty and production is
//!   still ongoing. `None` is returned only once the queue is empty and
//!   completion has been signaled; this is the sole exit condition for a
//!   consumer loop.
//! - [`Producer::signal_done`] is idempotent and wakes every blocked waiter
//!   on both conditions, so no thread can stay blocked once no more progress
//!   is possible. Dropping the producer signals completion too.

mod consumer;
mod producer;

pub use consumer::Consumer;
pub use producer::Producer;

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use crossbeam_utils::CachePadded;

pub(crate) struct State<T> {
    items: VecDeque<T>,
    done: bool,
}

pub(crate) struct Shared<T> {
    /// Occupancy, head/tail and the completion flag live under one lock;
    /// padded so the mutex word does not share a line with the condvars.
    state: CachePadded<Mutex<State<T>>>,
    /// Consumers wait here for items or completion.
    not_empty: Condvar,
    /// The producer waits here for space.
    not_full: Condvar,
    capacity: usize,
}

impl<T> Shared<T> {
    /// A poisoned lock means a peer panicked mid-operation; the pipeline
    /// surfaces that as a fatal error at join time, so the queue itself
    /// keeps serving the remaining threads instead of cascading panics.
    fn lock_state(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_not_empty<'a>(&self, guard: MutexGuard<'a, State<T>>) -> MutexGuard<'a, State<T>> {
        self.not_empty
            .wait(guard)
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_not_full<'a>(&self, guard: MutexGuard<'a, State<T>>) -> MutexGuard<'a, State<T>> {
        self.not_full
            .wait(guard)
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Creates a bounded queue of the given capacity, split into its two
/// endpoints: a single [`Producer`] and a cloneable [`Consumer`].
///
/// # Panics
///
/// Panics if `capacity` is zero; a zero-capacity queue could never accept an
/// item. Configuration-level validation rejects this before a run starts.
pub fn bounded<T>(capacity: usize) -> (Producer<T>, Consumer<T>) {
    assert!(capacity > 0, "queue capacity must be positive");
    let shared = Arc::new(Shared {
        state: CachePadded::new(Mutex::new(State {
            items: VecDeque::with_capacity(capacity),
            done: false,
        })),
        not_empty: Condvar::new(),
        not_full: Condvar::new(),
        capacity,
    });
    let producer = Producer::new(Arc::clone(&shared));
    let consumer = Consumer::new(shared);
    (producer, consumer)
}
