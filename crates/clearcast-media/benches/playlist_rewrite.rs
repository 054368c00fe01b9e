//! Benchmarks for clearcast-media.
//!
//! Run with: cargo bench -p clearcast-media

use clearcast_common::{DecryptionKey, KeyList};
use clearcast_manifest::parse_manifest;
use clearcast_media::{rewrite_hls_playlist, synthesize_playlist};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fmt::Write;

const ZERO: &str = "00000000000000000000000000000000";

const MPD: &str = r#"<MPD type="static"><Period>
  <AdaptationSet mimeType="video/mp4">
    <SegmentTemplate timescale="90000" startNumber="500" media="v/$Number$.m4s" initialization="v/init.mp4">
      <SegmentTimeline><S t="0" d="540000" r="499"/></SegmentTimeline>
    </SegmentTemplate>
    <Representation id="1" bandwidth="5000000" width="1920" height="1080"/>
  </AdaptationSet>
  <AdaptationSet mimeType="audio/mp4">
    <SegmentTemplate timescale="48000" startNumber="500" media="a/$Number$.m4s" initialization="a/init.mp4">
      <SegmentTimeline><S t="0" d="288000" r="499"/></SegmentTimeline>
    </SegmentTemplate>
    <Representation id="2" bandwidth="128000" audioSamplingRate="48000"/>
  </AdaptationSet>
</Period></MPD>"#;

fn native_playlist(segments: usize) -> String {
    let mut out = String::from("#EXTM3U\n#EXT-X-VERSION:7\n#EXT-X-TARGETDURATION:6\n");
    writeln!(out, "#EXT-X-KEY:METHOD=SAMPLE-AES,URI=\"skd://key\"").unwrap();
    writeln!(out, "#EXT-X-MAP:URI=\"init.mp4\"").unwrap();
    for i in 0..segments {
        writeln!(out, "#EXTINF:6.000,").unwrap();
        writeln!(out, "video/seg-{i}.m4s").unwrap();
    }
    out
}

fn bench_rewrite(c: &mut Criterion) {
    let key: DecryptionKey = ZERO.parse().unwrap();
    let mut group = c.benchmark_group("rewrite_hls_playlist");
    for segments in [10usize, 100, 1000] {
        let playlist = native_playlist(segments);
        group.throughput(Throughput::Bytes(playlist.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(segments), &playlist, |b, p| {
            b.iter(|| rewrite_hls_playlist(black_box(p), &key))
        });
    }
    group.finish();
}

fn bench_synthesize(c: &mut Criterion) {
    let manifest = parse_manifest(MPD).unwrap();
    let keys = KeyList::parse(ZERO).unwrap();
    c.bench_function("synthesize_playlist_vod_500", |b| {
        b.iter(|| {
            synthesize_playlist(
                black_box(&manifest),
                "https://cdn.example.com/vod/",
                &keys,
                Some(1),
                None,
                true,
            )
        })
    });
}

criterion_group!(benches, bench_rewrite, bench_synthesize);
criterion_main!(benches);
