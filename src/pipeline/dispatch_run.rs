use std::thread;

use tracing::debug;

use crate::config::RunConfig;
use crate::dispatch::{self, DispatchError, Mailbox, Rank};
use crate::item::{Generator, WorkItem};
use crate::pipeline::{PipelineError, finish, worker_loop};
use crate::report::{GlobalReport, WorkerResult};

/// Runs the pipeline over the dispatch transport: the producer is rank 0 and
/// addresses each item to a worker rank explicitly; no state is shared.
///
/// Items are assigned round-robin over `1..=worker_count`. After the last
/// real item the producer sends every rank one sentinel; each worker exits
/// its receive loop on the first sentinel it sees and never needs a second
/// termination check. Joining every thread is the post-pipeline barrier.
pub fn run_dispatch(config: &RunConfig) -> Result<GlobalReport, PipelineError> {
    config.validate()?;

    let (tx, mailboxes) = dispatch::hub::<WorkItem>(config.worker_count, config.mailbox_capacity);
    let mut generator = Generator::new(config.counter_mode, config.item_len);
    let array_num = config.array_num;
    let item_len = config.item_len;
    let worker_count = config.worker_count;

    let results = thread::scope(|s| {
        let producer = s.spawn(move || -> Result<(), DispatchError> {
            debug!(array_num, worker_count, "coordinator started");
            for i in 0..array_num {
                tx.send(tx.round_robin(i), generator.generate())?;
            }
            for rank in 1..=worker_count {
                tx.send(Rank(rank), WorkItem::sentinel(item_len))?;
            }
            debug!("coordinator finished");
            Ok(())
        });

        let workers: Vec<_> = mailboxes
            .into_iter()
            .map(|mailbox| s.spawn(move || dispatch_worker(mailbox)))
            .collect();

        // If the producer failed, its endpoint is gone and every receive
        // below resolves immediately; no worker can stay blocked.
        let mut failure = match producer.join() {
            Ok(Ok(())) => None,
            Ok(Err(error)) => Some(PipelineError::Transport(error)),
            Err(_) => Some(PipelineError::ProducerPanicked),
        };

        let mut results = Vec::with_capacity(worker_count);
        for (index, handle) in workers.into_iter().enumerate() {
            match handle.join() {
                Ok(Ok(result)) => results.push(result),
                Ok(Err(error)) => {
                    if failure.is_none() {
                        failure = Some(PipelineError::Transport(error));
                    }
                }
                Err(_) => {
                    if failure.is_none() {
                        failure = Some(PipelineError::WorkerPanicked { worker: index + 1 });
                    }
                }
            }
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(results),
        }
    })?;

    finish(array_num, results)
}

fn dispatch_worker(mailbox: Mailbox<WorkItem>) -> Result<WorkerResult, DispatchError> {
    let worker = mailbox.rank().0;
    worker_loop(worker, || {
        let item = mailbox.receive()?;
        Ok(if item.is_sentinel() { None } else { Some(item) })
    })
}
