//! Benchmarks for the resolution cascade against the bundled dataset.
//!
//! Run with: cargo bench -p geoloc-core

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use geoloc_core::prelude::*;
use std::hint::black_box;

fn sample_store() -> LocationStore {
    let path = LocationStore::bundled_dataset_path();
    let opts = NormalizeOptions::default();
    LocationStore::load_from_path(path, &opts).expect("bundled dataset")
}

fn bench_strategies(c: &mut Criterion) {
    let store = sample_store();
    let resolver = Resolver::new(&store);
    let mut group = c.benchmark_group("resolve");

    // One input per step of the cascade, cheapest first.
    let inputs = [
        ("exact", "Mexico"),
        ("two_token", "Paris, France"),
        ("country_code", "Shelbyville, US"),
        ("country_scan", "living in nigeria since 2010"),
        ("city_scan", "greater toronto area"),
        ("abbreviation", "BCN"),
        ("guess", "naija"),
        ("no_match", "zqj qzx zqj qzx"),
    ];
    for (label, raw) in inputs {
        group.bench_with_input(BenchmarkId::new("strategy", label), raw, |b, raw| {
            b.iter(|| black_box(resolver.resolve(black_box(raw)).is_ok()));
        });
    }
    group.finish();
}

fn bench_scan_length(c: &mut Criterion) {
    let store = sample_store();
    let resolver = Resolver::new(&store);
    let mut group = c.benchmark_group("scan_length");

    for len in [16usize, 32, 64] {
        let raw: String = "x".repeat(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &raw, |b, raw| {
            b.iter(|| black_box(resolver.resolve(black_box(raw)).is_err()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strategies, bench_scan_length);
criterion_main!(benches);
