//! Fold and grouping benchmarks
//!
//! Run with: cargo bench --bench fold_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rill_core::array::to_array;
use rill_core::fold::stats::{Length, Sum, Variance};
use rill_core::fold::{run, tee};
use rill_core::group::{chunks_of, split_on};

/// Benchmark a plain terminal fold over a contiguous input.
fn bench_fold_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("fold_sum");

    for size in [1_000usize, 100_000] {
        let input: Vec<i64> = (0..size as i64).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| run(Sum::new(), black_box(input.iter().copied())));
        });
    }

    group.finish();
}

/// Benchmark composed folds: tee should cost roughly the sum of its parts.
fn bench_fold_tee(c: &mut Criterion) {
    let input: Vec<i64> = (0..100_000).collect();
    let mut group = c.benchmark_group("fold_tee");
    group.throughput(Throughput::Elements(input.len() as u64));
    group.bench_function("sum_and_length", |b| {
        b.iter(|| {
            run(
                tee(Sum::new(), Length::new()),
                black_box(input.iter().copied()),
            )
        });
    });
    group.finish();
}

/// Benchmark the Welford variance recurrence per element.
fn bench_fold_variance(c: &mut Criterion) {
    let input: Vec<f64> = (0..100_000).map(f64::from).collect();
    let mut group = c.benchmark_group("fold_variance");
    group.throughput(Throughput::Elements(input.len() as u64));
    group.bench_function("welford", |b| {
        b.iter(|| run(Variance::new(), black_box(input.iter().copied())));
    });
    group.finish();
}

/// Benchmark the grouping state machine with synthetic boundaries.
fn bench_chunks_of(c: &mut Criterion) {
    let input: Vec<i64> = (0..100_000).collect();
    let mut group = c.benchmark_group("chunks_of");
    group.throughput(Throughput::Elements(input.len() as u64));

    for chunk in [16usize, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                chunks_of(chunk, Sum::new(), black_box(input.iter().copied()))
                    .for_each(|sum| {
                        black_box(sum);
                    });
            });
        });
    }

    group.finish();
}

/// Benchmark delimiter splitting over a byte stream (streaming KMP).
fn bench_split_on(c: &mut Criterion) {
    let mut text = Vec::with_capacity(128 * 1024);
    for i in 0..4096 {
        text.extend_from_slice(format!("record-{i}\r\n").as_bytes());
    }
    let mut group = c.benchmark_group("split_on");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("crlf_lengths", |b| {
        b.iter(|| {
            split_on(b"\r\n", Length::new(), black_box(text.iter().copied())).for_each(|len| {
                black_box(len);
            });
        });
    });
    group.finish();
}

/// Benchmark the unchecked-append accumulation target.
fn bench_to_array(c: &mut Criterion) {
    let input: Vec<u8> = (0u8..=255).cycle().take(64 * 1024).collect();
    let mut group = c.benchmark_group("to_array");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("bytes", |b| {
        b.iter(|| run(to_array(input.len()), black_box(input.iter().copied())));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_fold_sum,
    bench_fold_tee,
    bench_fold_variance,
    bench_chunks_of,
    bench_split_on,
    bench_to_array
);
criterion_main!(benches);
