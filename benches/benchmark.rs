//! Benchmarks for pan_validator performance testing.
//!
//! Run with: cargo bench

use pan_validator::{
    batch::{count_valid, parse_batch},
    classify,
    classify::classify_iin,
    luhn, parse_pan, parse_pan_components,
    stream::ParseExt,
    BatchParser, Pan,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// Test numbers
const VISA: &str = "4000000000000002";
const VISA_FORMATTED: &str = "4000-0000-0000-0002";
const AMEX: &str = "378282246310005";
const SOLO_19: &str = "6334500000000000002";
const UNKNOWN: &str = "1000000000000008";

const VISA_BASE: [u8; 15] = [4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
const SOLO_19_DIGITS: [u8; 19] = [6, 3, 3, 4, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2];

/// Benchmark single PAN parsing
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("visa_16", |b| b.iter(|| parse_pan(black_box(VISA))));

    group.bench_function("amex_15", |b| b.iter(|| parse_pan(black_box(AMEX))));

    group.bench_function("solo_19", |b| b.iter(|| parse_pan(black_box(SOLO_19))));

    group.bench_function("visa_formatted", |b| {
        b.iter(|| Pan::parse_formatted(black_box(VISA_FORMATTED)))
    });

    group.bench_function("components", |b| {
        b.iter(|| {
            parse_pan_components(
                black_box("400000"),
                black_box("000000000"),
                black_box('2'),
            )
        })
    });

    group.bench_function("checksum_mismatch", |b| {
        b.iter(|| parse_pan(black_box("4000000000000003")))
    });

    group.finish();
}

/// Benchmark the Luhn algorithm
fn bench_luhn(c: &mut Criterion) {
    let mut group = c.benchmark_group("luhn");

    group.bench_function("check_digit_15", |b| {
        b.iter(|| luhn::check_digit(black_box(&VISA_BASE)))
    });

    group.bench_function("validate_19", |b| {
        b.iter(|| luhn::validate(black_box(&SOLO_19_DIGITS)))
    });

    group.bench_function("check_digit_str", |b| {
        b.iter(|| luhn::check_digit_str(black_box("7992739871")))
    });

    group.finish();
}

/// Benchmark classification, including the catch-all at the end of the table
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let visa = parse_pan(VISA).unwrap();
    let solo = parse_pan(SOLO_19).unwrap();
    let unknown = parse_pan(UNKNOWN).unwrap();

    group.bench_function("first_ranges", |b| b.iter(|| classify(black_box(&visa))));
    group.bench_function("solo_ranges", |b| b.iter(|| classify(black_box(&solo))));
    group.bench_function("no_match", |b| b.iter(|| classify(black_box(&unknown))));
    group.bench_function("catch_all_iin", |b| {
        b.iter(|| classify_iin(black_box(699999)))
    });

    group.finish();
}

/// Benchmark batch parsing at various sizes
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");

    for size in [10, 100, 1000, 10000].iter() {
        let inputs: Vec<&str> = [VISA, AMEX, SOLO_19, UNKNOWN, "4000000000000003"]
            .iter()
            .cycle()
            .take(*size)
            .copied()
            .collect();

        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("parse_all", size), &inputs, |b, inputs| {
            b.iter(|| parse_batch(black_box(inputs)))
        });

        group.bench_with_input(BenchmarkId::new("classify_all", size), &inputs, |b, inputs| {
            b.iter(|| BatchParser::new().classify_all(black_box(inputs)))
        });

        group.bench_with_input(BenchmarkId::new("count_valid", size), &inputs, |b, inputs| {
            b.iter(|| count_valid(black_box(inputs)))
        });

        group.bench_with_input(BenchmarkId::new("stream", size), &inputs, |b, inputs| {
            b.iter(|| {
                inputs
                    .iter()
                    .copied()
                    .parse_valid_only()
                    .filter(|pan| classify(pan).is_some())
                    .count()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_luhn, bench_classify, bench_batch);
criterion_main!(benches);
