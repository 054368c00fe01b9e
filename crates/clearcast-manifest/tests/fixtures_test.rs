//! Fixture tests for clearcast-manifest.
//!
//! `fixtures/vod_cenc.mpd` is a protected two-period on-demand presentation;
//! `fixtures/live_clear.mpd` is an unprotected live audio-only presentation.

use clearcast_common::Error;
use clearcast_manifest::{parse_manifest, TypedValue};

const VOD_CENC: &str = include_str!("fixtures/vod_cenc.mpd");
const LIVE_CLEAR: &str = include_str!("fixtures/live_clear.mpd");

#[test]
fn manifest_level_fields() {
    let manifest = parse_manifest(VOD_CENC).unwrap();
    assert_eq!(manifest.id, Some(TypedValue::Text("0123".into())));
    assert_eq!(manifest.kind.as_deref(), Some("static"));
    assert!(!manifest.is_live());
    assert_eq!(manifest.duration.as_deref(), Some("PT1M0S"));
    assert_eq!(manifest.min_buffer_time.as_deref(), Some("PT2S"));
    assert_eq!(manifest.base_urls, vec!["dash/".to_string()]);
    assert_eq!(manifest.period.id, Some(TypedValue::Text("p0".into())));
}

#[test]
fn only_first_period_and_media_sets_are_kept() {
    let manifest = parse_manifest(VOD_CENC).unwrap();
    let ids: Vec<_> = manifest
        .adaptation_sets
        .iter()
        .map(|a| a.id.clone())
        .collect();
    assert_eq!(ids, vec![Some(TypedValue::Integer(1)), Some(TypedValue::Integer(2))]);
    assert!(manifest.adaptation_sets[0].is_video);
    assert!(manifest.adaptation_sets[1].is_audio);
    assert_eq!(manifest.adaptation_sets[1].lang.as_deref(), Some("en"));
}

#[test]
fn video_inherits_template_and_protection() {
    let manifest = parse_manifest(VOD_CENC).unwrap();
    let video = manifest.primary_adaptation_set().unwrap();
    assert!(video.is_video);

    let best = video.best_representation().unwrap();
    assert_eq!(best.id, TypedValue::Text("v1080".into()));
    assert_eq!(best.timescale, 90000);
    assert_eq!(best.start_number, 1);
    assert_eq!(best.segment_duration, 6.0);
    assert!(best.protected);
    assert_eq!(
        best.default_kid.as_deref(),
        Some("9eb4050d-e44b-4802-932e-27d75083e266")
    );
    assert!(best
        .widevine_pssh
        .as_deref()
        .is_some_and(|p| p.starts_with("AAAAW3Bzc2g")));
    assert_eq!(
        best.initialization_url(),
        "video/v1080/init.mp4?tok=1"
    );
    assert_eq!(best.media_url(12), "video/v1080/seg-00012.m4s?tok=1");
}

#[test]
fn audio_representation_details() {
    let manifest = parse_manifest(VOD_CENC).unwrap();
    let audio = &manifest.adaptation_sets[1];
    let rep = audio.best_representation().unwrap();
    assert_eq!(rep.audio_channels, Some(TypedValue::Integer(2)));
    assert_eq!(rep.audio_sampling_rate, Some(TypedValue::Integer(48000)));
    assert_eq!(rep.segment_duration, 6.0);
    assert!(rep.protected);
    assert!(rep.widevine_pssh.is_none());
    assert_eq!(rep.media_url(3), "audio/seg-3.m4s");
}

#[test]
fn live_audio_only_manifest() {
    let manifest = parse_manifest(LIVE_CLEAR).unwrap();
    assert!(manifest.is_live());
    let primary = manifest.primary_adaptation_set().unwrap();
    assert!(primary.is_audio);

    let rep = primary.best_representation().unwrap();
    assert_eq!(rep.id, TypedValue::Integer(2));
    assert_eq!(rep.start_number, 100);
    assert_eq!(rep.segment_duration, 4.0);
    assert!(!rep.protected);
    assert_eq!(rep.media_url(101), "a_96000_101.m4s");
    assert_eq!(rep.initialization_url(), "a_96000_init.mp4");
}

#[test]
fn missing_timeline_fails() {
    let mpd = r#"<MPD><Period><AdaptationSet mimeType="video/mp4">
        <SegmentTemplate timescale="1" media="s-$Number$.m4s" initialization="i.mp4"/>
        <Representation id="1" bandwidth="1"/>
    </AdaptationSet></Period></MPD>"#;
    assert!(matches!(parse_manifest(mpd), Err(Error::ManifestParse(_))));
}

#[test]
fn non_integer_dimensions_fail() {
    let mpd = r#"<MPD><Period><AdaptationSet mimeType="video/mp4">
        <SegmentTemplate timescale="1" media="s-$Number$.m4s" initialization="i.mp4">
          <SegmentTimeline><S d="4"/></SegmentTimeline>
        </SegmentTemplate>
        <Representation id="1" width="wide" height="720"/>
    </AdaptationSet></Period></MPD>"#;
    assert!(matches!(parse_manifest(mpd), Err(Error::ManifestParse(_))));
}

#[test]
fn missing_period_or_garbage_fails() {
    assert!(matches!(parse_manifest("<MPD/>"), Err(Error::ManifestParse(_))));
    assert!(matches!(parse_manifest("not xml <<<"), Err(Error::ManifestParse(_))));
}
