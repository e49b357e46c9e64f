//! secp256r1 point arithmetic benchmarks over a runtime-configured curve

use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use ctcurve::{
    BigUint, Curve, CurveConfig, Formulas, PrimeField, ProjectivePoint, ScalarMulAlgorithm,
};
use hex_literal::hex;
use rand::{SeedableRng, rngs::StdRng};

const P: [u8; 32] = hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
const A: [u8; 32] = hex!("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc");
const B: [u8; 32] = hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");
const N: [u8; 32] = hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");
const G: [u8; 64] = hex!(
    "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"
    "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"
);

fn test_scalar() -> BigUint {
    BigUint::from_bytes_be(&hex!(
        "519b423d715f8b581f4fa8ee59f4771a5b44c8130b4e3eacca54a56dda72b464"
    ))
}

fn field() -> PrimeField {
    PrimeField::from_be_bytes(&P).unwrap()
}

fn curve(field: &PrimeField, config: CurveConfig) -> Curve<'_> {
    Curve::from_be_bytes(field, &A, &B, &N)
        .unwrap()
        .with_config(config)
}

fn bench_point_mul<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let field = field();
    let k = test_scalar();
    let mut rng = StdRng::seed_from_u64(0);

    for (name, algorithm) in [
        ("mul double-and-add-always", ScalarMulAlgorithm::DoubleAndAddAlways),
        (
            "mul double-and-add-always small stack",
            ScalarMulAlgorithm::DoubleAndAddAlwaysSmallStack,
        ),
        ("mul montgomery ladder", ScalarMulAlgorithm::MontgomeryLadder),
    ] {
        let curve = curve(
            &field,
            CurveConfig {
                formulas: Formulas::Complete,
                algorithm,
            },
        );
        let g = ProjectivePoint::from_bytes(&curve, &G).unwrap();
        group.bench_function(name, |b| b.iter(|| g.mul(&k, &mut rng)));
    }

    let curve = curve(&field, CurveConfig::default());
    let g = ProjectivePoint::from_bytes(&curve, &G).unwrap();
    group.bench_function("mul blinded", |b| b.iter(|| g.mul_blinded(&k, &mut rng)));
    group.bench_function("mul unprotected", |b| b.iter(|| g.mul_unprotected(&k)));
}

fn bench_point_add<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let field = field();
    for (name, formulas) in [
        ("add complete", Formulas::Complete),
        ("add incomplete", Formulas::Incomplete),
    ] {
        let curve = curve(
            &field,
            CurveConfig {
                formulas,
                ..Default::default()
            },
        );
        let g = ProjectivePoint::from_bytes(&curve, &G).unwrap();
        let h = g.double().unwrap();
        group.bench_function(name, |b| b.iter(|| g.add(&h)));
    }
}

fn bench_point_double<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let field = field();
    for (name, formulas) in [
        ("double complete", Formulas::Complete),
        ("double incomplete", Formulas::Incomplete),
    ] {
        let curve = curve(
            &field,
            CurveConfig {
                formulas,
                ..Default::default()
            },
        );
        let g = ProjectivePoint::from_bytes(&curve, &G).unwrap();
        group.bench_function(name, |b| b.iter(|| g.double()));
    }
}

fn bench_point_encoding<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let field = field();
    let curve = curve(&field, CurveConfig::default());
    let g = ProjectivePoint::from_bytes(&curve, &G).unwrap();
    let encoded = g.to_bytes().unwrap();
    group.bench_function("from_bytes", |b| {
        b.iter(|| ProjectivePoint::from_bytes(&curve, &encoded))
    });
    group.bench_function("to_affine", |b| b.iter(|| g.to_affine()));
}

fn bench_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("point operations");
    bench_point_mul(&mut group);
    bench_point_add(&mut group);
    bench_point_double(&mut group);
    bench_point_encoding(&mut group);
    group.finish();
}

criterion_group!(benches, bench_point);
criterion_main!(benches);
