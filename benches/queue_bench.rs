use criterion::{BatchSize, BenchmarkId, Criterion};
use std::hint::black_box;
use turnqueue::{QueueEngine, Roster, RosterEntry, Salesperson, SalespersonId};

const DAY: i64 = 20_000 * 86_400_000;

fn build_engine(people: usize, sales: usize) -> QueueEngine {
    let mut engine = QueueEngine::new();
    for p in 0..people {
        engine.add_salesperson(Salesperson::new(format!("p{p}"), format!("Person {p}")));
    }
    for s in 0..sales {
        engine.register_sale(SalespersonId::new(format!("p{}", s % people)), DAY + s as i64 * 1_000);
    }
    engine
}

fn build_roster(people: usize) -> Roster {
    let mut roster = Roster::new();
    for p in 0..people {
        let entry = RosterEntry::new(format!("Person {p}"), p % 4 != 0).active_at(DAY);
        roster.upsert(format!("p{p}"), entry);
    }
    roster
}

pub fn bench_queue_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_build");

    for sales in [100, 1_000, 10_000] {
        let engine = build_engine(30, sales);

        group.bench_with_input(BenchmarkId::new("queue", sales), &engine, |b, e| {
            b.iter(|| black_box(e.queue()));
        });
    }

    group.finish();
}

pub fn bench_filtered_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_queue");
    let engine = build_engine(30, 5_000);
    let roster = build_roster(30);
    let now = DAY + 10_000_000;

    group.bench_function("filtered_5k", |b| {
        b.iter(|| black_box(engine.filtered_queue(black_box(now), &roster, Some(10))));
    });

    group.finish();
}

pub fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder");

    for sales in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("move_to_front", sales), &sales, |b, &n| {
            b.iter_batched(
                || {
                    let engine = build_engine(30, n);
                    let last = engine.log().iter().last().map(|sale| sale.id);
                    (engine, last)
                },
                |(mut engine, last)| {
                    if let Some(sale_id) = last {
                        black_box(engine.reorder(&sale_id, 0, DAY + 99_000_000));
                    }
                    engine
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_queue_build(c);
    bench_filtered_queue(c);
    bench_reorder(c);
}
