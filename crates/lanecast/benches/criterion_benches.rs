//! Criterion benchmarks for lanecast
//!
//! Measures wall-clock time for register conversions and bulk slice
//! conversions across backends.
//! Run with: cargo bench --bench criterion_benches

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lanecast::simd::{BackendType, ConversionContext};
use lanecast::{Species, Vector, VectorShape};
use std::hint::black_box;

/// Benchmark single-register lanewise conversions
fn bench_register_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_convert");

    let bytes = Vector::splat(Species::<i8>::of(VectorShape::S128), -7i8);
    let doubles = Vector::splat(Species::<f64>::of(VectorShape::S512), 1.5e10f64);

    group.bench_function("i8_to_i32_convert", |bencher| {
        bencher.iter(|| black_box(black_box(bytes).convert::<i32>()))
    });

    group.bench_function("i8_to_i32_shape_512", |bencher| {
        let species = Species::<i32>::of(VectorShape::S512);
        bencher.iter(|| black_box(black_box(bytes).convert_shape(species)))
    });

    group.bench_function("f64_to_i16_saturating", |bencher| {
        let species = Species::<i16>::of(VectorShape::S128);
        bencher.iter(|| black_box(black_box(doubles).convert_shape(species)))
    });

    group.finish();
}

/// Benchmark reinterpretation and part selection
fn bench_reinterpret(c: &mut Criterion) {
    let mut group = c.benchmark_group("reinterpret");

    let ints = Vector::splat(Species::<i32>::of(VectorShape::S256), 0x0102_0304);

    group.bench_function("i32_as_f64_same_shape", |bencher| {
        let species = Species::<f64>::of(VectorShape::S256);
        bencher.iter(|| black_box(black_box(ints).reinterpret_shape(species)))
    });

    group.bench_function("i32_as_i8_part_3", |bencher| {
        let species = Species::<i8>::of(VectorShape::S64);
        bencher.iter(|| black_box(black_box(ints).reinterpret_shape_part(species, 3)))
    });

    group.finish();
}

/// Benchmark bulk slice conversion per backend
fn bench_convert_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_slice");

    for size in [64usize, 1024, 16384] {
        let input: Vec<i32> = (0..size as i32).map(|i| i.wrapping_mul(2_654_435_761u32 as i32)).collect();
        let mut output = vec![0.0f32; size];
        group.throughput(Throughput::Elements(size as u64));

        for backend in BackendType::ALL {
            let Some(ctx) = ConversionContext::with_backend(backend) else {
                continue;
            };
            group.bench_with_input(
                BenchmarkId::new(format!("i32_to_f32_{}", backend), size),
                &size,
                |bencher, _| bencher.iter(|| ctx.convert_slice(black_box(&input), &mut output)),
            );
        }

        // Generic engine path
        let ctx = ConversionContext::new();
        let mut narrow = vec![0i8; size];
        group.bench_with_input(
            BenchmarkId::new("i32_to_i8_generic", size),
            &size,
            |bencher, _| bencher.iter(|| ctx.convert_slice(black_box(&input), &mut narrow)),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_register_convert,
    bench_reinterpret,
    bench_convert_slice
);
criterion_main!(benches);
