use std::{
    cell::Cell,
    marker::PhantomData,
    sync::Arc,
};

use tracing::trace;

use crate::queue::Shared;

/// The producing endpoint of a bounded queue.
///
/// There is exactly one producer per queue; the handle is deliberately not
/// cloneable. Dropping it signals completion, so workers can never be
/// stranded by a producer that went out of scope without calling
/// [`signal_done`](Producer::signal_done).
pub struct Producer<T> {
    shared: Arc<Shared<T>>,
    _not_clone: PhantomData<Cell<()>>, //marker type to avoid cloning implementations
}

impl<T> Producer<T> {
    pub(super) fn new(shared: Arc<Shared<T>>) -> Self {
        Self {
            shared,
            _not_clone: PhantomData,
        }
    }

    /// Inserts an item at the tail, blocking while the queue is full.
    ///
    /// Once space exists the item is enqueued and one waiting consumer is
    /// woken. Items are never dropped; the call blocks indefinitely if
    /// consumers stop draining (a caller concern, not handled here).
    ///
    /// # Panics
    ///
    /// Pushing after [`signal_done`](Producer::signal_done) is a protocol
    /// violation and panics.
    pub fn push(&self, item: T) {
        let mut state = self.shared.lock_state();
        while state.items.len() == self.shared.capacity && !state.done {
            state = self.shared.wait_not_full(state);
        }
        assert!(!state.done, "push after signal_done");
        state.items.push_back(item);
        drop(state);
        self.shared.not_empty.notify_one();
    }

    /// Marks production as finished and wakes every blocked waiter.
    ///
    /// Idempotent: calls after the first have no further effect. After this,
    /// consumers drain whatever is still queued and then observe
    /// end-of-work.
    pub fn signal_done(&self) {
        let mut state = self.shared.lock_state();
        if state.done {
            return;
        }
        state.done = true;
        drop(state);
        trace!("queue producer signaled done");
        // Wake-all on both conditions: consumers parked on empty must see
        // end-of-work, and a producer parked on full (only possible through
        // misuse of a second handle, which the type forbids) must not hang.
        self.shared.not_empty.notify_all();
        self.shared.not_full.notify_all();
    }

    /// Returns the queue capacity.
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }
}

impl<T> Drop for Producer<T> {
    fn drop(&mut self) {
        self.signal_done();
    }
}
