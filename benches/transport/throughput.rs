//! End-to-end pipeline throughput per transport.
//!
//! Measures the full contract (generate, deliver, transform, terminate,
//! collect) for the shared bounded queue and the dispatch hub across worker
//! counts. Item length is reduced from the default so one iteration stays
//! cheap; the coordination cost under test is unaffected.

use criterion::{BenchmarkId, Criterion, Throughput};

use staffetta::{CounterMode, RunConfig, run_dispatch, run_shared};

const ARRAY_NUM: usize = 1000;
const ITEM_LEN: usize = 1024;
const QUEUE_CAPACITY: usize = 300;

fn config(worker_count: usize) -> RunConfig {
    RunConfig {
        array_num: ARRAY_NUM,
        item_len: ITEM_LEN,
        worker_count,
        queue_capacity: QUEUE_CAPACITY,
        mailbox_capacity: Some(QUEUE_CAPACITY),
        counter_mode: CounterMode::Continuous,
    }
}

fn worker_counts() -> Vec<usize> {
    let mut counts = vec![1, 2, num_cpus::get().saturating_sub(1).max(1)];
    counts.sort_unstable();
    counts.dedup();
    counts
}

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("transport_throughput");
    group.sample_size(10);
    group.throughput(Throughput::Elements(ARRAY_NUM as u64));

    for workers in worker_counts() {
        group.bench_function(BenchmarkId::new("shared_queue", workers), |b| {
            b.iter(|| run_shared(&config(workers)).unwrap())
        });
        group.bench_function(BenchmarkId::new("dispatch", workers), |b| {
            b.iter(|| run_dispatch(&config(workers)).unwrap())
        });
    }

    group.finish();
}
