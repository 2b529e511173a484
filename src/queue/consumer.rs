use std::sync::Arc;

use crate::queue::Shared;

/// The consuming endpoint of a bounded queue.
///
/// Cloneable: each worker holds its own handle onto the same queue. Items
/// are handed to exactly one consumer each, in production order; which
/// consumer receives which item is unspecified.
pub struct Consumer<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Consumer<T> {
    pub(super) fn new(shared: Arc<Shared<T>>) -> Self {
        Self { shared }
    }

    /// Removes the head item, blocking while the queue is empty and
    /// production is still ongoing.
    ///
    /// Returns `None` only when the queue is empty *and* completion has been
    /// signaled: the sole exit condition for a consumer loop. Otherwise the
    /// head item is returned and the producer is woken if it was blocked on
    /// a full queue.
    pub fn pop(&self) -> Option<T> {
        let mut state = self.shared.lock_state();
        while state.items.is_empty() && !state.done {
            state = self.shared.wait_not_empty(state);
        }
        let item = state.items.pop_front()?;
        drop(state);
        self.shared.not_full.notify_one();
        Some(item)
    }

    /// Current occupancy. Momentary by nature; only ever in
    /// `[0, capacity]`.
    pub fn len(&self) -> usize {
        self.shared.lock_state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the queue capacity.
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }
}

impl<T> Clone for Consumer<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}
