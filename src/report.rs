//! Per-worker results and the end-of-run report.

use std::io::{self, Write};
use std::time::Duration;

/// One worker's tally, produced exactly once at worker-loop exit and
/// immutable thereafter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerResult {
    /// Worker identity, `1..=worker_count` in both transports.
    pub worker: usize,
    /// Items this worker consumed and transformed.
    pub items_processed: usize,
    /// Wall-clock time spent in the worker loop, measured locally.
    pub elapsed: Duration,
}

/// All worker results of a completed run, ordered by worker id.
///
/// Only exists after every worker has exited; the pipeline's join barrier
/// guarantees there is no concurrent writer left when a report is rendered.
#[derive(Clone, Debug)]
pub struct GlobalReport {
    results: Vec<WorkerResult>,
}

impl GlobalReport {
    pub(crate) fn new(mut results: Vec<WorkerResult>) -> Self {
        results.sort_by_key(|result| result.worker);
        Self { results }
    }

    /// Per-worker results, ordered by worker id.
    pub fn results(&self) -> &[WorkerResult] {
        &self.results
    }

    /// Total items consumed across all workers.
    pub fn total_items(&self) -> usize {
        self.results.iter().map(|result| result.items_processed).sum()
    }

    /// The pipeline's total runtime: the maximum elapsed time across
    /// workers. The parallel stage is only as fast as its slowest worker,
    /// so this is a max, not a sum and not the producer's own time.
    pub fn total_runtime(&self) -> Duration {
        self.results
            .iter()
            .map(|result| result.elapsed)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Renders the textual report: one line per worker, then the summary.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for result in &self.results {
            writeln!(
                out,
                "{} processed {} arrays in {} ms",
                result.worker,
                result.items_processed,
                result.elapsed.as_millis()
            )?;
        }
        writeln!(out, "Total runtime: {} ms", self.total_runtime().as_millis())
    }
}
