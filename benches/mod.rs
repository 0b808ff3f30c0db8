use criterion::{criterion_group, criterion_main};

mod queue_bench;

criterion_group!(
    benches,
    queue_bench::register_benchmarks,
    replay_bench::register_benchmarks
);
criterion_main!(benches);
