//! Rank-addressed dispatch: the distributed transport.
//!
//! Point-to-point, order-preserving delivery from a coordinator rank to a
//! set of worker ranks, with no shared mutable state between them. The
//! producer explicitly targets one worker per message; each worker blocks on
//! its own mailbox until something addressed to it arrives. Correctness
//! rests entirely on per-rank delivery order plus the sentinel-based
//! termination protocol layered on top by the pipeline.
//!
//! Backed by one flume channel per worker rank. Whether `send` blocks is a
//! property of the mailbox capacity chosen at hub construction: bounded
//! mailboxes apply backpressure per rank, `None` reproduces unbounded
//! in-flight messaging.

mod dispatcher;
mod mailbox;

pub use dispatcher::Dispatcher;
pub use mailbox::Mailbox;

use std::fmt;

use thiserror::Error;

/// Identity of a process/actor in the dispatch topology.
///
/// Rank 0 is the coordinator/producer; workers are `1..=worker_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(pub usize);

/// The coordinator's own rank.
pub const COORDINATOR: Rank = Rank(0);

impl Rank {
    /// Returns true for a worker rank (anything but the coordinator).
    pub fn is_worker(self) -> bool {
        self != COORDINATOR
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transport failures. All of them are fatal for the run: deliveries are
/// never retried and no work item is ever replayed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The targeted rank is not a worker rank of this hub.
    #[error("no worker rank {0} exists in this topology")]
    UnknownRank(Rank),
    /// The targeted worker dropped its mailbox; its peer is gone.
    #[error("worker rank {0} disconnected")]
    Disconnected(Rank),
    /// The coordinator went away before this rank observed termination.
    #[error("coordinator disconnected before rank {0} observed termination")]
    CoordinatorGone(Rank),
}

/// Creates a dispatch hub for `worker_count` workers: one [`Dispatcher`]
/// for the coordinator and one [`Mailbox`] per worker rank, in rank order
/// `1..=worker_count`.
///
/// `mailbox_capacity` bounds each rank's in-flight messages; `None` leaves
/// delivery unbounded.
///
/// # Panics
///
/// Panics if `worker_count` is zero; a topology needs at least one worker
/// besides the coordinator. Configuration-level validation rejects this
/// before a run starts.
pub fn hub<T>(
    worker_count: usize,
    mailbox_capacity: Option<usize>,
) -> (Dispatcher<T>, Vec<Mailbox<T>>) {
    assert!(worker_count > 0, "dispatch topology needs at least one worker");
    let mut outboxes = Vec::with_capacity(worker_count);
    let mut mailboxes = Vec::with_capacity(worker_count);
    for rank in 1..=worker_count {
        let (tx, rx) = match mailbox_capacity {
            Some(capacity) => flume::bounded(capacity),
            None => flume::unbounded(),
        };
        outboxes.push(tx);
        mailboxes.push(Mailbox::new(Rank(rank), rx));
    }
    (Dispatcher::new(outboxes), mailboxes)
}
