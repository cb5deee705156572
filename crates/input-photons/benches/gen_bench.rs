//! Criterion microbenches for the photon generators and the hot combinators.
//!
//! - generators: random spherical, uniform disc, rain line, grid.
//! - replication: 1D and 2D on the corner set.
//! - checker and NPY encode on a 100k array.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use input_photons::check::find_violation;
use input_photons::generate::{
    cube_corners, grid_xy, line_xz, random_spherical, uniform_disc, GenCtx, LineSampling, Seed,
};
use input_photons::photon::{Precision, Z};
use input_photons::replicate::{parallelize_1d, parallelize_2d};
use input_photons::{generate, npy};

fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for n in [1_000usize, 100_000] {
        group.bench_function(BenchmarkId::new("random_spherical", n), |b| {
            b.iter_batched(
                || GenCtx::new(Seed::Fixed(42), Precision::F4),
                |mut ctx| random_spherical(&mut ctx, n),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(BenchmarkId::new("uniform_disc", n), |b| {
            b.iter_batched(
                || GenCtx::new(Seed::Fixed(42), Precision::F4),
                |mut ctx| uniform_disc(&mut ctx, n, 500.0),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(BenchmarkId::new("rain_even", n), |b| {
            b.iter_batched(
                || GenCtx::new(Seed::Fixed(42), Precision::F4),
                |mut ctx| {
                    line_xz(&mut ctx, LineSampling::Even(n), -Z, (-250.0, 250.0), 0.0, 1000.0)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.bench_function(BenchmarkId::new("grid_xy", "40k"), |b| {
        let ctx = GenCtx::new(Seed::Fixed(0), Precision::F4);
        b.iter(|| grid_xy(&ctx, 40_000, 1000.0, 1000.0))
    });
    group.bench_function(BenchmarkId::new("by_name", "RainXZ_Z230_10k"), |b| {
        b.iter(|| generate("RainXZ_Z230_10k", Seed::Fixed(0), Precision::F4).unwrap())
    });
    group.finish();
}

fn bench_replicate(c: &mut Criterion) {
    let mut group = c.benchmark_group("replicate");
    let base = cube_corners(&GenCtx::new(Seed::Fixed(0), Precision::F4));
    group.bench_function(BenchmarkId::new("parallelize_1d", 100), |b| {
        b.iter(|| parallelize_1d(&base, 100))
    });
    group.bench_function(BenchmarkId::new("parallelize_2d", "100x100"), |b| {
        b.iter(|| parallelize_2d(&base, &[100, 100]))
    });
    group.finish();
}

fn bench_check_and_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("post");
    let a = random_spherical(&mut GenCtx::new(Seed::Fixed(1), Precision::F4), 100_000);
    group.bench_function(BenchmarkId::new("find_violation", "100k"), |b| {
        b.iter(|| find_violation(&a, 1e-6))
    });
    group.bench_function(BenchmarkId::new("npy_write", "100k"), |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(a.len() * 64 + 128);
            npy::write(&mut buf, &a).unwrap();
            buf
        })
    });
    group.finish();
}

criterion_group!(benches, bench_generators, bench_replicate, bench_check_and_encode);
criterion_main!(benches);
