//! Ed25519 scalar multiplication benchmarks

use core::hint::black_box;
use criterion::{
    BatchSize, BenchmarkGroup, BenchmarkId, Criterion, criterion_group, criterion_main,
    measurement::Measurement,
};
use ed25519_scalarmult::{
    CompressedEdwardsY, ED25519_BASEPOINT_COMPRESSED, Scalar, scalarmult, scalarmult_base,
    scalarmult_base_noclamp, scalarmult_noclamp,
};
use hex_literal::hex;
use rand_core::{OsRng, RngCore};

const POINT: [u8; 32] = hex!("c9e3abff43096a358d0a004763c2aeecf424e030910e3f79e4fdea749cb5dd32");

fn random_bytes() -> [u8; 32] {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

fn bench_scalarmult<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.bench_function("scalarmult", |b| {
        b.iter_batched(
            random_bytes,
            |n| scalarmult(&n, &POINT),
            BatchSize::SmallInput,
        )
    });
    group.bench_function("scalarmult_noclamp", |b| {
        b.iter_batched(
            random_bytes,
            |n| scalarmult_noclamp(&n, &POINT),
            BatchSize::SmallInput,
        )
    });
}

fn bench_scalarmult_base<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.bench_function("scalarmult_base", |b| {
        b.iter_batched(random_bytes, |n| scalarmult_base(&n), BatchSize::SmallInput)
    });
    group.bench_function("scalarmult_base_noclamp", |b| {
        b.iter_batched(
            random_bytes,
            |n| scalarmult_base_noclamp(&n),
            BatchSize::SmallInput,
        )
    });
}

fn bench_decompress<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let compressed = CompressedEdwardsY(POINT);
    group.bench_function("decompress_unchecked", |b| {
        b.iter(|| compressed.decompress_unchecked())
    });
    group.bench_function("decompress", |b| {
        b.iter(|| ED25519_BASEPOINT_COMPRESSED.decompress())
    });
}

fn bench_scalar_invert<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.bench_function("scalar invert", |b| {
        b.iter_batched(
            || Scalar::random(&mut OsRng),
            |s| s.invert(),
            BatchSize::SmallInput,
        )
    });
}

/// Fixed scalars of very different Hamming weight. Every operation should
/// report the same time for each of them.
const SCALAR_CLASSES: [(&str, [u8; 32]); 4] = [
    ("one", hex!("0100000000000000000000000000000000000000000000000000000000000000")),
    ("single high bit", hex!("0000000000000000000000000000000000000000000000000000000000000040")),
    ("alternating", hex!("5555555555555555555555555555555555555555555555555555555555555555")),
    ("dense", [0xff; 32]),
];

fn bench_timing_classes<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    for (class, n) in SCALAR_CLASSES.iter() {
        group.bench_with_input(BenchmarkId::new("scalarmult", class), n, |b, n| {
            b.iter(|| scalarmult(black_box(n), &POINT))
        });
        group.bench_with_input(BenchmarkId::new("scalarmult_noclamp", class), n, |b, n| {
            b.iter(|| scalarmult_noclamp(black_box(n), &POINT))
        });
        group.bench_with_input(BenchmarkId::new("scalarmult_base", class), n, |b, n| {
            b.iter(|| scalarmult_base(black_box(n)))
        });
        group.bench_with_input(
            BenchmarkId::new("scalarmult_base_noclamp", class),
            n,
            |b, n| b.iter(|| scalarmult_base_noclamp(black_box(n))),
        );
    }
}

fn bench_ed25519(c: &mut Criterion) {
    let mut group = c.benchmark_group("Ed25519 scalar multiplication");
    bench_scalarmult(&mut group);
    bench_scalarmult_base(&mut group);
    bench_decompress(&mut group);
    bench_scalar_invert(&mut group);
    group.finish();
}

fn bench_ed25519_timing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Ed25519 scalar classes");
    bench_timing_classes(&mut group);
    group.finish();
}

criterion_group!(benches, bench_ed25519, bench_ed25519_timing);
criterion_main!(benches);
