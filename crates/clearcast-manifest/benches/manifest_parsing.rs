//! Benchmarks for clearcast-manifest.
//!
//! Run with: cargo bench -p clearcast-manifest

use clearcast_manifest::{parse_manifest, select_best_representation};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const VOD_CENC: &str = include_str!("../tests/fixtures/vod_cenc.mpd");
const LIVE_CLEAR: &str = include_str!("../tests/fixtures/live_clear.mpd");

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_manifest");
    group.bench_function("vod_cenc", |b| b.iter(|| parse_manifest(black_box(VOD_CENC))));
    group.bench_function("live_clear", |b| b.iter(|| parse_manifest(black_box(LIVE_CLEAR))));
    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let manifest = parse_manifest(VOD_CENC).unwrap();
    let reps = &manifest.adaptation_sets[0].representations;
    c.bench_function("select_best_representation", |b| {
        b.iter(|| select_best_representation(black_box(reps)))
    });
}

criterion_group!(benches, bench_parse, bench_select);
criterion_main!(benches);
