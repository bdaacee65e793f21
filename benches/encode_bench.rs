use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use huffpack::{compress, Config, FrequencyTable, HuffmanEncoder, HuffmanTree};

fn sample(len: usize) -> Vec<u8> {
    // Skewed, text-like distribution.
    let alphabet = b"eeeeeeeetttttaaaaoooiiinnsshrdlu ,.\n";
    (0..len)
        .map(|i| alphabet[(i * 31 + i / 7) % alphabet.len()])
        .collect()
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let input = sample(64 * 1024);
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("count", |b| b.iter(|| FrequencyTable::from_bytes(&input)));

    let freqs = FrequencyTable::from_bytes(&input);
    group.bench_function("build_tree", |b| b.iter(|| HuffmanTree::build(&freqs).unwrap()));

    let encoder = HuffmanEncoder::new(&freqs).unwrap();
    group.bench_function("pack", |b| b.iter(|| encoder.encode(&input).unwrap()));
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let input = sample(256 * 1024);
    group.throughput(Throughput::Bytes(input.len() as u64));
    let config = Config::default();

    group.bench_function("compress", |b| {
        b.iter(|| {
            let mut reader = Cursor::new(&input);
            let mut out = Vec::with_capacity(input.len());
            compress(&mut reader, &mut out, &config).unwrap()
        })
    });

    // Full byte alphabet, every symbol equally likely.
    let uniform: Vec<u8> = (0..=255u8).cycle().take(256 * 1024).collect();
    group.bench_function("compress_uniform", |b| {
        b.iter(|| {
            let mut reader = Cursor::new(&uniform);
            let mut out = Vec::with_capacity(uniform.len());
            compress(&mut reader, &mut out, &config).unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_stages, bench_pipeline);
criterion_main!(benches);
