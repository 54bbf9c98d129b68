use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use magcyl::prelude::*;

fn profile_points(n: usize) -> Vec<R3> {
    (0..n)
        .map(|i| R3::new(-250.0 + 0.5 * i as Scalar, 0.0, 0.0))
        .collect()
}

fn reference_model() -> CylinderModel {
    CylinderModel {
        cylinder: EllipticCylinder::new(R3::new(0.0, 0.0, 5.0), 2.0, 1.0, 30.0).unwrap(),
        remanence: SphericalVector::new(25.0, 40.0, 2.0),
        ambient: SphericalVector::new(-3.0, 58.0, 48_500.0),
        susceptibility: Susceptibility::Isotropic { intensity: 0.01 },
    }
}

fn bench_field_profile(c: &mut Criterion) {
    let model = reference_model();
    let points = profile_points(1000);

    c.bench_function("field_profile_1k", |b| {
        b.iter_batched(
            || points.clone(),
            |pts| model.field_profile(&pts).unwrap(),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("field_profile_par_1k", |b| {
        b.iter_batched(
            || points.clone(),
            |pts| model.field_profile_par(&pts).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_field_profile);
criterion_main!(benches);
