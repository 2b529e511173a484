//! Single-producer / multi-consumer work distribution, benchmarked over two
//! interchangeable coordination transports.
//!
//! One producer emits a fixed number of fixed-size work items; a fixed set
//! of workers consumes them, performs a deterministic transform (sort +
//! checksum) and reports per-worker throughput and timing; every worker
//! observes a clean, total shutdown with no item lost or duplicated.
//!
//! ## Transports
//!
//! - [`queue`] — a capacity-bounded FIFO shared by the producer and all
//!   workers, with blocking push/pop and a one-shot completion signal.
//! - [`dispatch`] — rank-addressed point-to-point delivery with no shared
//!   state; termination is one sentinel item per worker rank.
//!
//! ## Running
//!
//! ```
//! use staffetta::{RunConfig, run_shared};
//!
//! let config = RunConfig {
//!     array_num: 100,
//!     item_len: 256,
//!     worker_count: 2,
//!     queue_capacity: 16,
//!     ..RunConfig::default()
//! };
//! let report = run_shared(&config)?;
//! assert_eq!(report.total_items(), 100);
//! report.render(&mut std::io::stdout())?;
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod item;
pub mod pipeline;
pub mod queue;
pub mod report;

pub use config::{ConfigError, RunConfig};
pub use item::{CounterMode, Generator, WorkItem};
pub use pipeline::{PipelineError, run_dispatch, run_shared};
pub use report::{GlobalReport, WorkerResult};
