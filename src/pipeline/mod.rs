//! The benchmark pipeline: one producer, many workers, one coordinator.
//!
//! Both runners drive the same contract over different transports: the
//! producer emits `array_num` generated items, the workers transform them
//! (sort + checksum) and tally private counts and timings, and every worker
//! observes a clean, total shutdown. The coordinator joins all actors (the
//! run's only post-pipeline barrier), verifies that no item was lost or
//! duplicated, and assembles the [`GlobalReport`].
//!
//! - [`run_shared`] — threads over one bounded blocking queue; termination
//!   is the queue's one-shot completion signal.
//! - [`run_dispatch`] — threads over rank-addressed mailboxes; termination
//!   is one sentinel item per worker rank.
//!
//! There is no cancellation, timeout or mid-run recovery in either model: a
//! failure aborts the run with a diagnostic, never with partial results.

mod dispatch_run;
mod shared_run;

pub use dispatch_run::run_dispatch;
pub use shared_run::run_shared;

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, trace};

use crate::config::ConfigError;
use crate::dispatch::DispatchError;
use crate::report::{GlobalReport, WorkerResult};

/// Fatal run failures. Nothing here is recoverable mid-run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The run was rejected at startup, before any work was produced.
    #[error("invalid run configuration: {0}")]
    Config(#[from] ConfigError),
    /// A delivery or receive could not complete; no replay is attempted.
    #[error("transport failure: {0}")]
    Transport(#[from] DispatchError),
    /// The producer panicked mid-run.
    #[error("producer panicked mid-run")]
    ProducerPanicked,
    /// A worker panicked mid-run.
    #[error("worker {worker} panicked mid-run")]
    WorkerPanicked { worker: usize },
    /// Completed workers account for a different number of items than were
    /// produced: an item was lost or duplicated somewhere.
    #[error("work conservation violated: produced {produced}, consumed {consumed}")]
    CountMismatch { produced: usize, consumed: usize },
}

/// Runs one worker loop body around a pull closure, with the private
/// bookkeeping every worker keeps: a local item count and wall-clock
/// timestamps around the loop. No state is shared with other workers.
fn worker_loop<E>(
    worker: usize,
    mut pull: impl FnMut() -> Result<Option<crate::item::WorkItem>, E>,
) -> Result<WorkerResult, E> {
    debug!(worker, "worker started");
    let start = Instant::now();
    let mut items_processed = 0usize;
    while let Some(mut item) = pull()? {
        let checksum = item.transform();
        trace!(worker, checksum, "item transformed");
        items_processed += 1;
    }
    let elapsed = start.elapsed();
    debug!(worker, items_processed, "worker finished");
    Ok(WorkerResult {
        worker,
        items_processed,
        elapsed,
    })
}

/// Post-barrier coordinator step: every produced item must have been
/// consumed exactly once across the workers.
fn finish(produced: usize, results: Vec<WorkerResult>) -> Result<GlobalReport, PipelineError> {
    let report = GlobalReport::new(results);
    let consumed = report.total_items();
    if consumed != produced {
        return Err(PipelineError::CountMismatch { produced, consumed });
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::item::CounterMode;

    /// A run small enough to execute quickly; scenario constants override
    /// the fields they pin.
    fn test_config() -> RunConfig {
        RunConfig {
            array_num: 100,
            item_len: 64,
            worker_count: 3,
            queue_capacity: 8,
            mailbox_capacity: Some(8),
            counter_mode: CounterMode::Continuous,
        }
    }

    #[test]
    fn shared_run_conserves_all_items() {
        let config = RunConfig {
            array_num: 1000,
            worker_count: 3,
            queue_capacity: 300,
            ..test_config()
        };
        let report = run_shared(&config).unwrap();
        assert_eq!(report.total_items(), 1000);
        let ids: Vec<usize> = report.results().iter().map(|r| r.worker).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn dispatch_run_conserves_all_items() {
        let config = RunConfig {
            array_num: 1000,
            worker_count: 3,
            ..test_config()
        };
        let report = run_dispatch(&config).unwrap();
        assert_eq!(report.total_items(), 1000);
        let ids: Vec<usize> = report.results().iter().map(|r| r.worker).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    /// Six items over five ranks: assignment goes 1,2,3,4,5,1, so rank 1
    /// processes two items and the rest one each.
    #[test]
    fn dispatch_round_robin_splits_six_items_over_five_ranks() {
        let config = RunConfig {
            array_num: 6,
            worker_count: 5,
            ..test_config()
        };
        let report = run_dispatch(&config).unwrap();
        let counts: Vec<usize> = report
            .results()
            .iter()
            .map(|r| r.items_processed)
            .collect();
        assert_eq!(counts, vec![2, 1, 1, 1, 1]);
    }

    #[test]
    fn single_worker_consumes_everything() {
        let config = RunConfig {
            worker_count: 1,
            ..test_config()
        };
        assert_eq!(run_shared(&config).unwrap().total_items(), 100);
        assert_eq!(run_dispatch(&config).unwrap().total_items(), 100);
    }

    /// An empty run still terminates cleanly: all workers observe the
    /// termination signal having processed nothing.
    #[test]
    fn zero_items_still_terminates_cleanly() {
        let config = RunConfig {
            array_num: 0,
            ..test_config()
        };
        for report in [run_shared(&config).unwrap(), run_dispatch(&config).unwrap()] {
            assert_eq!(report.total_items(), 0);
            assert_eq!(report.results().len(), 3);
        }
    }

    #[test]
    fn both_counter_modes_complete() {
        for mode in [CounterMode::Continuous, CounterMode::PerItem] {
            let config = RunConfig {
                counter_mode: mode,
                ..test_config()
            };
            assert_eq!(run_shared(&config).unwrap().total_items(), 100);
            assert_eq!(run_dispatch(&config).unwrap().total_items(), 100);
        }
    }

    /// An unbounded dispatch run is accepted behavior, not an error.
    #[test]
    fn unbounded_mailboxes_are_accepted() {
        let config = RunConfig {
            mailbox_capacity: None,
            ..test_config()
        };
        assert_eq!(run_dispatch(&config).unwrap().total_items(), 100);
    }

    #[test]
    fn degenerate_topology_is_rejected_before_any_work() {
        let config = RunConfig {
            worker_count: 0,
            ..test_config()
        };
        assert!(matches!(
            run_shared(&config),
            Err(PipelineError::Config(ConfigError::NoWorkers))
        ));
        assert!(matches!(
            run_dispatch(&config),
            Err(PipelineError::Config(ConfigError::NoWorkers))
        ));
    }

    #[test]
    fn report_renders_after_a_real_run() {
        let report = run_shared(&test_config()).unwrap();
        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4); // three workers + summary
        assert!(text.ends_with(&format!(
            "Total runtime: {} ms\n",
            report.total_runtime().as_millis()
        )));
    }
}
