//! Field element benchmarks over the secp256r1 base field

use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use dynfield::{FieldElement, PrimeField};
use hex_literal::hex;

const P: [u8; 32] = hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");

fn test_field_element_x(field: &PrimeField) -> FieldElement<'_> {
    FieldElement::from_be_bytes(
        field,
        &hex!("1ccbe91c075fc7f4f033bfa248db8fccd3565de94bbfb12f3c59ff46c271bf83"),
    )
    .unwrap()
}

fn test_field_element_y(field: &PrimeField) -> FieldElement<'_> {
    FieldElement::from_be_bytes(
        field,
        &hex!("ce4014c68811f9a21a1fdb2c0e6113e06db7ca93b7404e78dc7ccd5ca89a4ca9"),
    )
    .unwrap()
}

fn bench_field_element_mul<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>, field: &PrimeField) {
    let x = test_field_element_x(field);
    let y = test_field_element_y(field);
    group.bench_function("mul", |b| b.iter(|| x * y));
}

fn bench_field_element_square<'a, M: Measurement>(
    group: &mut BenchmarkGroup<'a, M>,
    field: &PrimeField,
) {
    let x = test_field_element_x(field);
    group.bench_function("square", |b| b.iter(|| x.square()));
}

fn bench_field_element_add<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>, field: &PrimeField) {
    let x = test_field_element_x(field);
    let y = test_field_element_y(field);
    group.bench_function("add", |b| b.iter(|| x + y));
}

fn bench_field_element_invert<'a, M: Measurement>(
    group: &mut BenchmarkGroup<'a, M>,
    field: &PrimeField,
) {
    let x = test_field_element_x(field);
    group.bench_function("invert", |b| b.iter(|| x.invert()));
}

fn bench_field_element(c: &mut Criterion) {
    let field = PrimeField::from_be_bytes(&P).unwrap();
    let mut group = c.benchmark_group("field element operations");
    bench_field_element_mul(&mut group, &field);
    bench_field_element_square(&mut group, &field);
    bench_field_element_add(&mut group, &field);
    bench_field_element_invert(&mut group, &field);
    group.finish();
}

criterion_group!(benches, bench_field_element);
criterion_main!(benches);
