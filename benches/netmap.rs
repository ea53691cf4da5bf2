//! Benchmarks for pyramid construction and UV remapping.

use criterion::{criterion_group, criterion_main, Criterion};

use apexwrap::prelude::*;

fn bench_pyramid_build(c: &mut Criterion) {
    c.bench_function("pyramid_build", |b| {
        b.iter(|| pyramid(2.0, 3.0).unwrap())
    });
}

fn bench_remap(c: &mut Criterion) {
    c.bench_function("remap_to_net", |b| {
        let mesh = pyramid(2.0, 3.0).unwrap();
        b.iter(|| {
            let mut m = mesh.clone();
            remap_to_net(&mut m).unwrap();
            m
        })
    });
}

fn bench_build_and_remap(c: &mut Criterion) {
    c.bench_function("build_and_remap", |b| {
        b.iter(|| {
            let mut mesh = pyramid(2.0, 3.0).unwrap();
            remap_to_net(&mut mesh).unwrap();
            mesh
        })
    });
}

criterion_group!(
    benches,
    bench_pyramid_build,
    bench_remap,
    bench_build_and_remap
);
criterion_main!(benches);
