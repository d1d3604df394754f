use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use factorial_rs::count::{CounterMode, LucyCounter};
use factorial_rs::factorial::{FactorizeConfig, OutputMode, factorize_factorial_u64};

fn bench_lucy_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("lucy_table_build");
    group.sample_size(10);
    for n in [10_000_000u64, 100_000_000, 1_000_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| LucyCounter::new(black_box(n)));
        });
    }
    group.finish();
}

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_factorization");
    group.sample_size(10);
    let n = 10_000_000u64;
    for (label, counter) in [
        ("enumerate", CounterMode::Enumerate),
        ("sublinear", CounterMode::Sublinear),
    ] {
        let cfg = FactorizeConfig {
            counter,
            output: OutputMode::Aggregate,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new(label, n), &n, |b, &n| {
            b.iter(|| factorize_factorial_u64(black_box(n), &cfg).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lucy_table, bench_backends);
criterion_main!(benches);
