use std::thread;

use tracing::debug;

use crate::config::RunConfig;
use crate::item::{Generator, WorkItem};
use crate::pipeline::{PipelineError, finish, worker_loop};
use crate::queue::{self, Consumer};
use crate::report::{GlobalReport, WorkerResult};

/// Runs the pipeline over the shared-memory transport: producer and workers
/// are threads of this process sharing a bounded blocking queue as their
/// only mutable common state.
///
/// The producer pushes `array_num` generated items and signals completion
/// once; each worker pops until the queue reports end-of-work. Joining
/// every thread is the post-pipeline barrier, after which the coordinator
/// verifies conservation and builds the report.
pub fn run_shared(config: &RunConfig) -> Result<GlobalReport, PipelineError> {
    config.validate()?;

    let (tx, rx) = queue::bounded::<WorkItem>(config.queue_capacity);
    let mut generator = Generator::new(config.counter_mode, config.item_len);
    let array_num = config.array_num;

    let results = thread::scope(|s| {
        let producer = s.spawn(move || {
            debug!(array_num, "producer started");
            for _ in 0..array_num {
                tx.push(generator.generate());
            }
            tx.signal_done();
            debug!("producer finished");
        });

        let workers: Vec<_> = (1..=config.worker_count)
            .map(|worker| {
                let rx = rx.clone();
                s.spawn(move || shared_worker(worker, rx))
            })
            .collect();
        // The workers now hold the only consumer handles.
        drop(rx);

        let mut failure = None;
        if producer.join().is_err() {
            // A panicking producer drops its endpoint, which signals
            // completion, so the workers below still drain and exit.
            failure = Some(PipelineError::ProducerPanicked);
        }

        let mut results = Vec::with_capacity(config.worker_count);
        for (index, handle) in workers.into_iter().enumerate() {
            match handle.join() {
                Ok(result) => results.push(result),
                Err(_) if failure.is_none() => {
                    failure = Some(PipelineError::WorkerPanicked { worker: index + 1 });
                }
                Err(_) => {}
            }
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(results),
        }
    })?;

    finish(array_num, results)
}

fn shared_worker(worker: usize, rx: Consumer<WorkItem>) -> WorkerResult {
    // Queue pops cannot fail; end-of-work arrives as `None`.
    let Ok(result) = worker_loop(worker, || Ok::<_, std::convert::Infallible>(rx.pop()));
    result
}
