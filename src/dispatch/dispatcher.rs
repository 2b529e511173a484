use std::{cell::Cell, marker::PhantomData};

use tracing::trace;

use crate::dispatch::{DispatchError, Rank};

/// The coordinator's sending endpoint: rank-addressed delivery to every
/// worker mailbox in the hub.
///
/// Not cloneable; the topology has a single coordinator.
pub struct Dispatcher<T> {
    outboxes: Vec<flume::Sender<T>>,
    _not_clone: PhantomData<Cell<()>>, //marker type to avoid cloning implementations
}

impl<T> Dispatcher<T> {
    pub(super) fn new(outboxes: Vec<flume::Sender<T>>) -> Self {
        Self {
            outboxes,
            _not_clone: PhantomData,
        }
    }

    /// Number of worker ranks in the topology.
    pub fn worker_count(&self) -> usize {
        self.outboxes.len()
    }

    /// The worker rank for the item at 0-based production index `i`:
    /// `1 + (i mod worker_count)`. Deterministic and even to within one
    /// item per worker, regardless of worker speed.
    pub fn round_robin(&self, i: usize) -> Rank {
        Rank(1 + i % self.outboxes.len())
    }

    /// Delivers `item` to the given worker rank, preserving per-rank send
    /// order. Blocks while that rank's bounded mailbox is full.
    ///
    /// A delivery that cannot complete is fatal: the peer is gone and this
    /// design performs no replay.
    pub fn send(&self, rank: Rank, item: T) -> Result<(), DispatchError> {
        let outbox = rank
            .0
            .checked_sub(1)
            .and_then(|index| self.outboxes.get(index))
            .ok_or(DispatchError::UnknownRank(rank))?;
        outbox
            .send(item)
            .map_err(|_| DispatchError::Disconnected(rank))?;
        trace!(%rank, "dispatched message");
        Ok(())
    }
}
