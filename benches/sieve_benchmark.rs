use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use factorial_rs::sieve;

fn bench_small_primes(c: &mut Criterion) {
    let mut group = c.benchmark_group("small_primes");
    for limit in [100_000u64, 1_000_000, 10_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(limit), &limit, |b, &limit| {
            b.iter(|| sieve::small_primes(black_box(limit)).len());
        });
    }
    group.finish();
}

fn bench_segmented_sieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmented_sieve");
    for limit in [1_000_000u64, 10_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(limit), &limit, |b, &limit| {
            b.iter(|| sieve::SegmentedSieve::new(black_box(limit)).count());
        });
    }
    group.finish();
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("primes_in_window");
    // Fixed-width windows at increasing heights: base-sieve cost grows with √hi.
    for lo in [1_000_000u64, 1_000_000_000, 1_000_000_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(lo), &lo, |b, &lo| {
            b.iter(|| sieve::count_in(black_box(lo), black_box(lo + 100_000), 1 << 20).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_small_primes, bench_segmented_sieve, bench_window);
criterion_main!(benches);
