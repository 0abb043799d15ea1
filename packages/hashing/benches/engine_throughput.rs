//! Engine throughput across message sizes

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use shavs_hashing::{HashEngine, HashState, Sha224, Sha256, Sha384, Sha512, Sha512_256};
use std::hint::black_box;

fn bench_one_shot<E: HashEngine>(c: &mut Criterion, label: &str) {
    let mut group = c.benchmark_group(format!("{label}_digest"));
    let mut out = vec![0u8; E::DIGEST_LEN];

    for size in [64usize, 1024, 65536, 1_048_576] {
        group.throughput(Throughput::Bytes(size as u64));
        let data = vec![0u8; size];
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                E::digest(black_box(data), &mut out).expect("digest should succeed");
            });
        });
    }
    group.finish();
}

fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("sha256_streaming");
    let data = vec![0u8; 65536];
    group.throughput(Throughput::Bytes(data.len() as u64));

    for chunk in [1usize, 63, 4096] {
        group.bench_with_input(BenchmarkId::new("chunk", chunk), &chunk, |b, &chunk| {
            let mut state = HashState::<Sha256>::new().expect("state should initialize");
            b.iter(|| {
                state.reset().expect("reset should succeed");
                for piece in data.chunks(chunk) {
                    state.update(black_box(piece)).expect("update should succeed");
                }
                black_box(state.finalize().expect("finalize should succeed"));
            });
        });
    }
    group.finish();
}

fn bench_all(c: &mut Criterion) {
    bench_one_shot::<Sha224>(c, "sha224");
    bench_one_shot::<Sha256>(c, "sha256");
    bench_one_shot::<Sha384>(c, "sha384");
    bench_one_shot::<Sha512>(c, "sha512");
    bench_one_shot::<Sha512_256>(c, "sha512_256");
}

criterion_group!(benches, bench_all, bench_streaming);
criterion_main!(benches);
