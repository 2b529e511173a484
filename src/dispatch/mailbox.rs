use crate::dispatch::{DispatchError, Rank};

/// A worker rank's receiving endpoint.
///
/// Holds every message the coordinator addressed to this rank, in send
/// order. Each mailbox belongs to exactly one worker.
pub struct Mailbox<T> {
    rank: Rank,
    inbox: flume::Receiver<T>,
}

impl<T> Mailbox<T> {
    pub(super) fn new(rank: Rank, inbox: flume::Receiver<T>) -> Self {
        Self { rank, inbox }
    }

    /// The rank this mailbox belongs to.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Blocks until a message addressed to this rank arrives.
    ///
    /// Fails only if the coordinator disappeared without sending this rank
    /// its termination message; that is a fatal transport failure, never
    /// silently treated as end-of-work.
    pub fn receive(&self) -> Result<T, DispatchError> {
        self.inbox
            .recv()
            .map_err(|_| DispatchError::CoordinatorGone(self.rank))
    }
}
