use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use num_complex::Complex64;

use tmm_core::{coherent_tmm, DispersionModel, Polarization, Stack};

fn bench_two_layer_solve(c: &mut Criterion) {
    let air = Arc::new(DispersionModel::constant(Complex64::new(1.0, 0.0)));
    let glass = Arc::new(DispersionModel::constant(Complex64::new(1.5, 0.0)));
    let stack = Stack::new(air, glass);
    let theta0 = Complex64::new(0.3, 0.0);

    c.bench_function("coherent_tmm_two_layer", |b| {
        b.iter(|| {
            black_box(
                coherent_tmm(
                    black_box(&stack),
                    Polarization::S,
                    black_box(theta0),
                    black_box(500.0),
                )
                .unwrap(),
            )
        });
    });
}

fn bench_multilayer_solve(c: &mut Criterion) {
    let air = Arc::new(DispersionModel::constant(Complex64::new(1.0, 0.0)));
    let glass = Arc::new(DispersionModel::constant(Complex64::new(1.5, 0.0)));
    let mgf2 = Arc::new(DispersionModel::constant(Complex64::new(1.38, 0.0)));
    let ta2o5 = Arc::new(DispersionModel::constant(Complex64::new(2.1, 0.0)));

    let mut stack = Stack::new(air, glass);
    for _ in 0..10 {
        stack.insert_layer(mgf2.clone(), 97.0).unwrap();
        stack.insert_layer(ta2o5.clone(), 65.0).unwrap();
    }
    let theta0 = Complex64::new(0.2, 0.0);

    c.bench_function("coherent_tmm_22_layer_stack", |b| {
        b.iter(|| {
            black_box(
                coherent_tmm(
                    black_box(&stack),
                    Polarization::P,
                    black_box(theta0),
                    black_box(550.0),
                )
                .unwrap(),
            )
        });
    });
}

criterion_group!(benches, bench_two_layer_solve, bench_multilayer_solve);
criterion_main!(benches);
