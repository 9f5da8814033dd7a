//! Criterion benchmarks for the per-tick hot paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drift_core::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn bench_hash(c: &mut Criterion) {
    c.bench_function("hash_calculate", |b| {
        b.iter(|| hash::calculate(black_box(42), black_box(7)))
    });
    c.bench_function("hash_direction", |b| {
        b.iter(|| hash::direction(black_box(42), black_box(7)))
    });
}

fn bench_spring(c: &mut Criterion) {
    let mut s = SpringState::new(Vec3::ZERO);
    c.bench_function("spring_step_vec3", |b| {
        b.iter(|| {
            let cur = s.value;
            spring_step(&mut s, cur, black_box(Vec3::ONE), 5.0, DT)
        })
    });

    let mut r = RotationSpringState::default();
    let target = Quat::from_rotation_y(1.0);
    c.bench_function("spring_step_rotation", |b| {
        b.iter(|| {
            let cur = r.value;
            spring_step_rotation(&mut r, cur, black_box(target), 5.0, DT)
        })
    });
}

fn bench_noise(c: &mut Criterion) {
    let params = NoiseParams { octaves: 4, ..NoiseParams::<Vec3>::default() };
    let mut n = NoiseState::new();
    c.bench_function("noise_step_vector_4oct", |b| {
        b.iter(|| noise_step_vector(&mut n, &Simplex2, black_box(&params), DT))
    });
}

criterion_group!(benches, bench_hash, bench_spring, bench_noise);
criterion_main!(benches);
