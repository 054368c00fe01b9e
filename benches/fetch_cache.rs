//! Benchmarks for the upstream fetch cache.
//!
//! Measures lookup and insert cost at the capacities the gateway runs with.

use bytes::Bytes;
use clearcast::fetch::{FetchCache, Payload};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn segment_url(n: usize) -> String {
    format!("https://cdn.example.com/live/ch1/video/720p/seg-{n}.m4s")
}

fn filled(capacity: usize) -> FetchCache {
    let cache = FetchCache::new(capacity, 3600);
    for n in 0..capacity {
        cache.insert(&segment_url(n), Payload::Binary(Bytes::from(vec![0u8; 1024])));
    }
    cache
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_lookup");

    for capacity in [10, 100, 1000] {
        let cache = filled(capacity);
        let hit = segment_url(capacity / 2);
        let miss = segment_url(capacity + 1);

        group.bench_with_input(BenchmarkId::new("hit", capacity), &hit, |b, url| {
            b.iter(|| black_box(cache.get(url)))
        });
        group.bench_with_input(BenchmarkId::new("miss", capacity), &miss, |b, url| {
            b.iter(|| black_box(cache.get(url)))
        });
    }

    group.finish();
}

/// Inserting a new URL into a full cache scans for the oldest entry.
fn bench_insert_at_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_insert_evict");

    for capacity in [10, 100, 1000] {
        let cache = filled(capacity);
        let payload = Payload::Binary(Bytes::from(vec![0u8; 1024]));
        let mut n = capacity;

        group.bench_function(BenchmarkId::from_parameter(capacity), |b| {
            b.iter(|| {
                n += 1;
                cache.insert(&segment_url(n), payload.clone());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lookup, bench_insert_at_capacity);
criterion_main!(benches);
