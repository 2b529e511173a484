//! Raw MPMC channel baselines.
//!
//! The same single-producer / multi-worker shape hand-built on crossbeam,
//! flume and kanal bounded channels, with sender-drop as the termination
//! signal. Puts the bounded queue's block-and-wake cost next to mature
//! channel implementations doing equivalent work.

use std::hint::black_box;
use std::thread;

use criterion::{BenchmarkId, Criterion, Throughput};

use staffetta::{CounterMode, Generator, WorkItem};

const ARRAY_NUM: usize = 1000;
const ITEM_LEN: usize = 1024;
const CAPACITY: usize = 300;

fn new_generator() -> Generator {
    Generator::new(CounterMode::Continuous, ITEM_LEN)
}

fn crossbeam_run(workers: usize) -> usize {
    let (tx, rx) = crossbeam_channel::bounded::<WorkItem>(CAPACITY);
    thread::scope(|s| {
        s.spawn(move || {
            let mut generator = new_generator();
            for _ in 0..ARRAY_NUM {
                tx.send(generator.generate()).unwrap();
            }
        });
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let rx = rx.clone();
                s.spawn(move || {
                    let mut count = 0usize;
                    while let Ok(mut item) = rx.recv() {
                        black_box(item.transform());
                        count += 1;
                    }
                    count
                })
            })
            .collect();
        drop(rx);
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    })
}

fn flume_run(workers: usize) -> usize {
    let (tx, rx) = flume::bounded::<WorkItem>(CAPACITY);
    thread::scope(|s| {
        s.spawn(move || {
            let mut generator = new_generator();
            for _ in 0..ARRAY_NUM {
                tx.send(generator.generate()).unwrap();
            }
        });
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let rx = rx.clone();
                s.spawn(move || {
                    let mut count = 0usize;
                    while let Ok(mut item) = rx.recv() {
                        black_box(item.transform());
                        count += 1;
                    }
                    count
                })
            })
            .collect();
        drop(rx);
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    })
}

fn kanal_run(workers: usize) -> usize {
    let (tx, rx) = kanal::bounded::<WorkItem>(CAPACITY);
    thread::scope(|s| {
        s.spawn(move || {
            let mut generator = new_generator();
            for _ in 0..ARRAY_NUM {
                tx.send(generator.generate()).unwrap();
            }
        });
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let rx = rx.clone();
                s.spawn(move || {
                    let mut count = 0usize;
                    while let Ok(mut item) = rx.recv() {
                        black_box(item.transform());
                        count += 1;
                    }
                    count
                })
            })
            .collect();
        drop(rx);
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    })
}

pub fn bench(c: &mut Criterion) {
    let workers = num_cpus::get().saturating_sub(1).max(1);

    let mut group = c.benchmark_group("mpmc_baselines");
    group.sample_size(10);
    group.throughput(Throughput::Elements(ARRAY_NUM as u64));

    group.bench_function(BenchmarkId::new("crossbeam", workers), |b| {
        b.iter(|| assert_eq!(crossbeam_run(workers), ARRAY_NUM))
    });
    group.bench_function(BenchmarkId::new("flume", workers), |b| {
        b.iter(|| assert_eq!(flume_run(workers), ARRAY_NUM))
    });
    group.bench_function(BenchmarkId::new("kanal", workers), |b| {
        b.iter(|| assert_eq!(kanal_run(workers), ARRAY_NUM))
    });

    group.finish();
}
