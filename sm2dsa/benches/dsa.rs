//! SM2DSA benchmarks

use core::hint::black_box;
use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use hex_literal::hex;
use rand_core::OsRng;
use sm2dsa::{
    BigUint, SecretKey,
    dsa::{
        self, Signature, SigningKey,
        signature::{RandomizedSigner, Verifier},
    },
};

const SIGNING_KEY_BYTES: [u8; 32] =
    hex!("1cf6bc6c7f642a84994119e206c9f0753ff100709f4fd12f2338c1be60bf4175");

fn signing_key() -> SigningKey {
    SigningKey::from_bytes("", &SIGNING_KEY_BYTES).unwrap()
}

fn bench_keygen<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.bench_function("keygen", |b| {
        b.iter(|| black_box(SecretKey::random(&mut OsRng).unwrap()))
    });
}

fn bench_sign<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let sk = black_box(signing_key());
    let msg = black_box(b"example message");
    group.bench_function("sign", |b| {
        b.iter(|| {
            let sig: Signature = sk.sign_with_rng(&mut OsRng, msg);
            black_box(sig)
        })
    });
}

fn bench_sign_digest<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let sk = black_box(SecretKey::from_bytes(&SIGNING_KEY_BYTES).unwrap());
    let e = black_box(BigUint::from_bytes_be(&[0x42; 32]));
    group.bench_function("sign_digest", |b| {
        b.iter(|| black_box(dsa::sign(&mut OsRng, &sk, &e).unwrap()))
    });
}

fn bench_verify<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let sk = black_box(signing_key());
    let vk = black_box(sk.verifying_key());
    let msg = black_box(b"example message");
    let sig: Signature = black_box(sk.sign_with_rng(&mut OsRng, msg));
    group.bench_function("verify", |b| b.iter(|| vk.verify(msg, &sig)));
}

fn bench_dsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("SM2DSA");
    bench_keygen(&mut group);
    bench_sign(&mut group);
    bench_sign_digest(&mut group);
    bench_verify(&mut group);
    group.finish();
}

criterion_group!(benches, bench_dsa);
criterion_main!(benches);
