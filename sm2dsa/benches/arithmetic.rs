//! SM2 field and group arithmetic benchmarks

use core::hint::black_box;
use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use hex_literal::hex;
use sm2dsa::{AffinePoint, BigUint, CurveParams};

const FE_A: [u8; 32] = hex!("32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7");
const FE_B: [u8; 32] = hex!("BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0");

fn bench_field_mul<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let fp = CurveParams::sm2().field();
    let a = black_box(BigUint::from_bytes_be(&FE_A));
    let b = black_box(BigUint::from_bytes_be(&FE_B));
    group.bench_function("mul_mod", |bench| bench.iter(|| fp.mul_mod(&a, &b)));
}

fn bench_field_invert<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let fp = CurveParams::sm2().field();
    let a = black_box(BigUint::from_bytes_be(&FE_A));
    group.bench_function("inv_mod", |bench| bench.iter(|| fp.inv_mod(&a)));
}

fn bench_field_sqrt<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let fp = CurveParams::sm2().field();
    let a = black_box(BigUint::from_bytes_be(&FE_B));
    group.bench_function("sqrt", |bench| bench.iter(|| fp.sqrt(&a)));
}

fn bench_point_add<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let g = AffinePoint::generator();
    let h = black_box(g.double());
    group.bench_function("point add", |bench| bench.iter(|| g.add(&h)));
}

fn bench_scalar_mul<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let g = AffinePoint::generator();
    let k = black_box(BigUint::from_bytes_be(&FE_B));
    group.bench_function("point-scalar mul", |bench| bench.iter(|| g.mul(&k)));
}

fn bench_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("field element operations");
    bench_field_mul(&mut group);
    bench_field_invert(&mut group);
    bench_field_sqrt(&mut group);
    group.finish();
}

fn bench_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("point operations");
    bench_point_add(&mut group);
    bench_scalar_mul(&mut group);
    group.finish();
}

criterion_group!(benches, bench_field, bench_point);
criterion_main!(benches);
