//! Benchmarks for p-adic conversion, digit arithmetic and reconstruction.
//!
//! Run with: cargo bench --bench padic_benchmarks
//!
//! The brute-force stepper is benchmarked next to the Hensel extraction it
//! cross-checks; expect several orders of magnitude between them.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crypto_bigint::{U128, U64};
use num_bigint::BigInt;
use num_rational::Ratio as NumRatio;
use padic_ratio::{Bounds, Ratio, RatioU64};

type NumRational = NumRatio<BigInt>;

// ============================================================================
// CONVERSION
// ============================================================================

fn bench_to_padic(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_padic");

    let cases = [
        ("1/3 p=5", (1i64, 3i64, 5u64)),
        ("-517/1477 p=7", (-517, 1477, 7)),
        ("1048575/1048573 p=32749", (1_048_575, 1_048_573, 32_749)),
    ];

    for (name, (n, d, p)) in cases {
        let ratio = RatioU64::from_i64(n, d).unwrap();
        for precision in [10usize, 32, 63] {
            group.bench_with_input(
                BenchmarkId::new(name, precision),
                &precision,
                |b, &k| {
                    b.iter(|| black_box(ratio.to_padic(black_box(p), k).unwrap()));
                },
            );
        }
    }

    group.finish();
}

fn bench_stepper_vs_hensel(c: &mut Criterion) {
    let mut group = c.benchmark_group("stepper_vs_hensel");
    let ratio = RatioU64::from_i64(-2, 7).unwrap();

    group.bench_function("hensel", |b| {
        b.iter(|| black_box(ratio.to_padic(5, 8).unwrap()));
    });

    group.bench_function("steps_from_hensel", |b| {
        b.iter(|| black_box(ratio.to_padic_steps(5, 8).unwrap()));
    });

    group.bench_function("brute_force", |b| {
        b.iter(|| black_box(ratio.to_padic_expansion(5, 8).unwrap()));
    });

    group.finish();
}

// ============================================================================
// DIGIT ARITHMETIC
// ============================================================================

fn bench_digit_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("digit_arithmetic");
    let x = RatioU64::from_i64(-517, 1477).unwrap().to_padic(7, 40).unwrap();
    let y = RatioU64::from_i64(3, 4).unwrap().to_padic(7, 40).unwrap();

    group.bench_function("add", |b| {
        b.iter(|| black_box(black_box(&x).add(black_box(&y)).unwrap()));
    });

    group.bench_function("cmpt", |b| {
        b.iter(|| black_box(black_box(&x).cmpt()));
    });

    group.bench_function("dsum_u64_overflow", |b| {
        b.iter(|| black_box(black_box(&x).dsum::<U64>()));
    });

    group.bench_function("dsum_u128", |b| {
        b.iter(|| black_box(black_box(&x).dsum::<U128>()));
    });

    group.bench_function("display", |b| {
        b.iter(|| black_box(black_box(&x).to_string()));
    });

    group.finish();
}

// ============================================================================
// RECONSTRUCTION
// ============================================================================

fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_to_ratio");

    let cases = [
        ("38 p=5", (38i64, 1i64, 5u64, 7usize)),
        ("-2/7 p=5", (-2, 7, 5, 8)),
        ("-517/1477 p=7", (-517, 1477, 7, 11)),
    ];
    for (name, (n, d, p, k)) in cases {
        let padic = RatioU64::from_i64(n, d).unwrap().to_padic(p, k).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(padic.convert_to_ratio::<U64>().unwrap()));
        });
    }

    // worst case: every multiplier is tried
    let bounds = Bounds::default().with_max_approx(1_000);
    let third = RatioU64::from_i64(1, 3)
        .unwrap()
        .to_padic_with(5, 10, &bounds)
        .unwrap();
    group.bench_function("1/3 exhausted", |b| {
        b.iter(|| black_box(third.convert_to_ratio::<U64>().is_err()));
    });

    group.finish();
}

// ============================================================================
// RATIO ARITHMETIC
// ============================================================================

fn bench_ratio_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("ratio_arithmetic");

    let a = Ratio::<U128>::from_i64(-517, 1477).unwrap();
    let b = Ratio::<U128>::from_i64(1_048_575, 32_749).unwrap();
    let na = NumRational::new(BigInt::from(-517), BigInt::from(1477));
    let nb = NumRational::new(BigInt::from(1_048_575), BigInt::from(32_749));

    group.bench_function("add_reduce/Ratio<U128>", |bench| {
        bench.iter(|| black_box(black_box(&a).add(black_box(&b)).reduce()));
    });
    group.bench_function("add_reduce/num-rational", |bench| {
        bench.iter(|| black_box(black_box(&na) + black_box(&nb)));
    });

    group.bench_function("factors/Ratio<U128>", |bench| {
        bench.iter(|| black_box(black_box(&b).factors()));
    });
    group.bench_function("padic_abs/Ratio<U128>", |bench| {
        bench.iter(|| black_box(black_box(&a).padic_abs(7)));
    });

    group.finish();
}

criterion_group!(conversion, bench_to_padic, bench_stepper_vs_hensel);
criterion_group!(arithmetic, bench_digit_arithmetic, bench_ratio_arithmetic);
criterion_group!(reconstruction, bench_reconstruction);
criterion_main!(conversion, arithmetic, reconstruction);
