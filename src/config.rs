use thiserror::Error;

use crate::item::CounterMode;

/// Default number of items a run produces.
pub const DEFAULT_ARRAY_NUM: usize = 1000;
/// Default fixed length of every work item.
pub const DEFAULT_ITEM_LEN: usize = 100_000;
/// Default bounded-queue capacity for the shared-memory transport.
pub const DEFAULT_QUEUE_CAPACITY: usize = 300;
/// Default worker count for the shared-memory transport. The dispatch
/// transport derives its topology from the same figure: one coordinator
/// plus this many worker ranks.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Parameters of one benchmark run.
///
/// These are in-code configuration, not parsed from external input; a run is
/// described by constructing one of these (usually from [`Default`]) and
/// handing it to the pipeline.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Number of work items the producer emits.
    pub array_num: usize,
    /// Fixed length of every item.
    pub item_len: usize,
    /// Number of workers consuming items.
    pub worker_count: usize,
    /// Capacity of the shared-memory bounded queue.
    pub queue_capacity: usize,
    /// Per-rank in-flight bound for the dispatch transport. `None` leaves
    /// dispatch delivery unbounded, which is accepted behavior; the default
    /// bounds it to the queue capacity so both transports face comparable
    /// backpressure.
    pub mailbox_capacity: Option<usize>,
    /// Generation counter discipline, applied to whichever transport runs.
    pub counter_mode: CounterMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            array_num: DEFAULT_ARRAY_NUM,
            item_len: DEFAULT_ITEM_LEN,
            worker_count: DEFAULT_WORKER_COUNT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            mailbox_capacity: Some(DEFAULT_QUEUE_CAPACITY),
            counter_mode: CounterMode::default(),
        }
    }
}

/// Startup configuration failures. Fatal before any work is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A run needs one producer and at least one worker.
    #[error("a run needs a producer and at least one worker")]
    NoWorkers,
    /// A zero-capacity queue could never accept an item.
    #[error("queue capacity must be positive")]
    ZeroQueueCapacity,
    /// A zero-length item carries no first element, so the termination
    /// protocol could not be expressed.
    #[error("work items must hold at least one element")]
    ZeroItemLength,
}

impl RunConfig {
    /// Checks the run for degenerate topologies and parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        if self.item_len == 0 {
            return Err(ConfigError::ZeroItemLength);
        }
        Ok(())
    }
}
