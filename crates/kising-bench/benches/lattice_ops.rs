//! Criterion micro-benchmarks for lattice and class-table operations.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use kising_core::{Params, RandomSource};
use kising_engine::dynamics::glauber::GlauberKmc;
use kising_engine::SpinDynamics;
use kising_lattice::Lattice;
use kising_test_utils::random_buffer;

/// Benchmark: neighbour_sum_at on every site of a 100x100 lattice.
fn bench_neighbour_sums_10k(c: &mut Criterion) {
    let mut lat = Lattice::new(100, 100).unwrap();
    lat.import(&random_buffer(1, 100, 100)).unwrap();

    c.bench_function("neighbour_sum_10k", |b| {
        b.iter(|| {
            let mut acc = 0i64;
            for idx in 0..lat.cell_count() {
                acc += i64::from(lat.neighbour_sum_at(idx));
            }
            black_box(acc);
        });
    });
}

/// Benchmark: randomize a 256x256 lattice.
fn bench_randomize_64k(c: &mut Criterion) {
    let mut lat = Lattice::new(256, 256).unwrap();
    let mut rng = RandomSource::new(3);
    c.bench_function("randomize_256x256", |b| {
        b.iter(|| {
            lat.randomize(&mut rng);
            black_box(lat.up_count());
        });
    });
}

/// Benchmark: full energy evaluation on a 256x256 lattice.
fn bench_energy_64k(c: &mut Criterion) {
    let mut lat = Lattice::new(256, 256).unwrap();
    lat.randomize(&mut RandomSource::new(5));
    c.bench_function("energy_256x256", |b| {
        b.iter(|| black_box(lat.energy(0.44, 0.01)));
    });
}

/// Benchmark: rebuild Glauber event tables from scratch.
fn bench_glauber_rebuild_64k(c: &mut Criterion) {
    let mut lat = Lattice::new(256, 256).unwrap();
    lat.randomize(&mut RandomSource::new(9));
    let params = Params::new(0.44, 0.0, 1.0).unwrap();
    let mut kernel = GlauberKmc::new();
    c.bench_function("glauber_rebuild_256x256", |b| {
        b.iter(|| {
            kernel.rebuild(&lat, &params);
            black_box(kernel.total_rate());
        });
    });
}

criterion_group!(
    benches,
    bench_neighbour_sums_10k,
    bench_randomize_64k,
    bench_energy_64k,
    bench_glauber_rebuild_64k
);
criterion_main!(benches);
