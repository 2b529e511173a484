//! Transport benchmarks: shared bounded queue vs rank-addressed dispatch,
//! plus raw MPMC channel baselines.
//!
//! Run with: cargo bench --bench transport

use criterion::{criterion_group, criterion_main};

mod baselines;
mod throughput;

criterion_group!(benches, throughput::bench, baselines::bench);
criterion_main!(benches);
