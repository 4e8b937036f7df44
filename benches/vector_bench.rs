// In benches/vector_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use na_numerics::config::SummationCompensation;
use na_numerics::stats::{sum, sum_compensated};
use na_numerics::types::{SentinelFloat, SentinelInt};
use na_numerics::vector;

// --- Data Generation ---

const BENCH_LEN: usize = 65_536;

/// Integers with roughly `missing_pct` percent of slots missing.
fn generate_ints(len: usize, missing_pct: u32, seed: u64) -> Vec<SentinelInt<i32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            if rng.random_range(0..100) < missing_pct {
                SentinelInt::MISSING
            } else {
                SentinelInt::from_raw(rng.random_range(-1_000..1_000))
            }
        })
        .collect()
}

fn generate_floats(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-1.0e6..1.0e6)).collect()
}

// --- Benchmark Suite ---

fn bench_elementwise_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("Elementwise Add (i32)");
    group.throughput(Throughput::Elements(BENCH_LEN as u64));

    for missing_pct in [0u32, 10, 50] {
        let x = generate_ints(BENCH_LEN, missing_pct, 1);
        let y = generate_ints(BENCH_LEN, missing_pct, 2);
        let mut dst = vec![SentinelInt::<i32>::MISSING; BENCH_LEN];

        group.bench_function(format!("compute-then-patch, {}% missing", missing_pct), |b| {
            b.iter(|| vector::add(black_box(&x), black_box(&y), &mut dst))
        });

        group.bench_function(format!("per-element lifted, {}% missing", missing_pct), |b| {
            b.iter(|| {
                for ((d, &lhs), &rhs) in dst.iter_mut().zip(black_box(&x)).zip(black_box(&y)) {
                    *d = lhs + rhs;
                }
            })
        });
    }

    group.finish();
}

fn bench_float_scalar_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scalar Multiply In Place (f64)");
    group.throughput(Throughput::Elements(BENCH_LEN as u64));

    let raw = generate_floats(BENCH_LEN, 3);
    let mut values: Vec<SentinelFloat<f64>> = raw.iter().map(|&v| SentinelFloat::from_raw(v)).collect();
    let factor = SentinelFloat::from_raw(1.000_001);

    group.bench_function("multiply_scalar_in_place", |b| {
        b.iter(|| vector::multiply_scalar_in_place(black_box(&mut values), factor))
    });

    group.finish();
}

fn bench_summation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Summation (f64)");
    group.throughput(Throughput::Elements(BENCH_LEN as u64));

    let values = generate_floats(BENCH_LEN, 4);

    group.bench_function("naive", |b| b.iter(|| sum(black_box(&values))));

    group.bench_function("kahan-babuska-neumaier", |b| {
        b.iter(|| {
            sum_compensated(
                black_box(&values),
                SummationCompensation::KahanBabushkaNeumaier,
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_elementwise_add,
    bench_float_scalar_multiply,
    bench_summation
);
criterion_main!(benches);
