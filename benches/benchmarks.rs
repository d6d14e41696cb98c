use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pngtext::{read, text_chunks, trim, write, write_to, Metadata, ReadOptions, SIGNATURE};
use rand::{Rng, SeedableRng};

#[allow(dead_code)]
#[path = "../tests/harness/fixtures.rs"]
mod fixtures;

use fixtures::push_chunk;

/// An image-shaped stream: header, `idat_count` IDAT chunks of `idat_len` random bytes, IEND.
fn create_png(idat_count: usize, idat_len: usize) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut out = SIGNATURE.to_vec();
    push_chunk(&mut out, b"IHDR", &[0, 0, 4, 0, 0, 0, 4, 0, 8, 6, 0, 0, 0]);
    let mut payload = vec![0u8; idat_len];
    for _ in 0..idat_count {
        rng.fill(&mut payload[..]);
        push_chunk(&mut out, b"IDAT", &payload);
    }
    push_chunk(&mut out, b"IEND", &[]);
    out
}

fn create_metadata(count: usize, value_len: usize) -> Metadata {
    (0..count)
        .map(|i| (format!("key{i}"), "x".repeat(value_len)))
        .collect()
}

// Benchmark configuration
const IDAT_LEN: usize = 64 * 1024;
const SIZES: [usize; 3] = [1, 16, 64];

fn benchmark_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    let meta = create_metadata(4, 16 * 1024);
    for idats in SIZES {
        let png = create_png(idats, IDAT_LEN);
        group.throughput(Throughput::Bytes(png.len() as u64));
        group.bench_with_input(BenchmarkId::new("in_memory", idats), &png, |b, png| {
            b.iter(|| black_box(write(png, &meta).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("sink", idats), &png, |b, png| {
            b.iter(|| write_to(png, &meta, std::io::sink()).unwrap())
        });
    }
    group.finish();
}

fn benchmark_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    let meta = create_metadata(4, 16 * 1024);
    for idats in SIZES {
        let png = write(&create_png(idats, IDAT_LEN), &meta).unwrap();
        group.throughput(Throughput::Bytes(png.len() as u64));
        group.bench_with_input(BenchmarkId::new("unchecked", idats), &png, |b, png| {
            b.iter(|| black_box(read(png, ["key0", "key3"], ReadOptions::default()).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("checked", idats), &png, |b, png| {
            b.iter(|| black_box(read(png, ["key0", "key3"], ReadOptions::checked()).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("lazy_first", idats), &png, |b, png| {
            b.iter(|| black_box(text_chunks(png, ReadOptions::default()).next()))
        });
    }
    group.finish();
}

fn benchmark_trim(c: &mut Criterion) {
    let mut group = c.benchmark_group("trim");
    let meta = create_metadata(8, 1024);
    for idats in SIZES {
        let png = write(&create_png(idats, IDAT_LEN), &meta).unwrap();
        group.throughput(Throughput::Bytes(png.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(idats), &png, |b, png| {
            b.iter(|| black_box(trim(png).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_write, benchmark_read, benchmark_trim);
criterion_main!(benches);
