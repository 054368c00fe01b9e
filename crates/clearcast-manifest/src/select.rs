//! Best-representation ranking.

use std::cmp::Ordering;

use crate::model::Representation;
use crate::value::compare_ids;

/// Pick the preferred representation of an adaptation set.
///
/// Candidates are ranked, highest first, by pixel count, then bandwidth,
/// then audio sampling rate, then frame rate. A key only decides between two
/// candidates when both carry a non-zero value for it; otherwise the next
/// key is consulted. Fully tied candidates fall back to the lowest id.
pub fn select_best_representation(representations: &[Representation]) -> Option<&Representation> {
    let (first, rest) = representations.split_first()?;
    // Linear scan: the ranking is not a total order when keys are missing, so
    // a sort could be handed an inconsistent comparator.
    Some(rest.iter().fold(first, |best, candidate| {
        if rank(candidate, best) == Ordering::Less {
            candidate
        } else {
            best
        }
    }))
}

/// `Less` when `a` should be preferred over `b`.
fn rank(a: &Representation, b: &Representation) -> Ordering {
    let keys: [(f64, f64); 4] = [
        (a.pixel_count() as f64, b.pixel_count() as f64),
        (
            a.bandwidth.unwrap_or(0) as f64,
            b.bandwidth.unwrap_or(0) as f64,
        ),
        (
            a.audio_sampling_rate.as_ref().map_or(0.0, |v| v.numeric()),
            b.audio_sampling_rate.as_ref().map_or(0.0, |v| v.numeric()),
        ),
        (
            a.frame_rate.as_ref().map_or(0.0, |v| v.numeric()),
            b.frame_rate.as_ref().map_or(0.0, |v| v.numeric()),
        ),
    ];
    for (x, y) in keys {
        if x != 0.0 && y != 0.0 && x != y {
            return y.partial_cmp(&x).unwrap_or(Ordering::Equal);
        }
    }
    compare_ids(&a.id, &b.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TypedValue;

    fn rep(id: i64, width: i64, height: i64, bandwidth: i64) -> Representation {
        Representation {
            id: TypedValue::Integer(id),
            bandwidth: Some(bandwidth),
            width: Some(width),
            height: Some(height),
            frame_rate: None,
            audio_sampling_rate: None,
            codecs: None,
            timescale: 1,
            start_number: 1,
            media: "seg-$Number$.m4s".into(),
            initialization: "init.mp4".into(),
            segment_duration: 4.0,
            protected: false,
            default_kid: None,
            widevine_pssh: None,
            audio_channels: None,
        }
    }

    #[test]
    fn empty_and_single() {
        assert!(select_best_representation(&[]).is_none());
        let only = [rep(1, 640, 360, 1)];
        assert_eq!(select_best_representation(&only).unwrap().id, TypedValue::Integer(1));
    }

    #[test]
    fn resolution_beats_bandwidth() {
        let reps = [rep(1, 1280, 720, 9_000_000), rep(2, 1920, 1080, 1_000_000)];
        assert_eq!(select_best_representation(&reps).unwrap().id, TypedValue::Integer(2));
        let reps = [rep(2, 1920, 1080, 1_000_000), rep(1, 1280, 720, 9_000_000)];
        assert_eq!(select_best_representation(&reps).unwrap().id, TypedValue::Integer(2));
    }

    #[test]
    fn bandwidth_breaks_resolution_ties() {
        let reps = [rep(1, 1920, 1080, 3_000_000), rep(2, 1920, 1080, 5_000_000)];
        assert_eq!(select_best_representation(&reps).unwrap().id, TypedValue::Integer(2));
    }

    #[test]
    fn lowest_id_wins_full_tie() {
        let reps = [rep(7, 1920, 1080, 5_000_000), rep(3, 1920, 1080, 5_000_000)];
        assert_eq!(select_best_representation(&reps).unwrap().id, TypedValue::Integer(3));
    }

    #[test]
    fn audio_ranked_by_sampling_rate() {
        let mut low = rep(1, 0, 0, 128_000);
        low.audio_sampling_rate = Some(TypedValue::Integer(44_100));
        let mut high = rep(2, 0, 0, 128_000);
        high.audio_sampling_rate = Some(TypedValue::Integer(48_000));
        let reps = [low, high];
        assert_eq!(select_best_representation(&reps).unwrap().id, TypedValue::Integer(2));
    }

    #[test]
    fn fractional_frame_rate() {
        let mut slow = rep(1, 1920, 1080, 5_000_000);
        slow.frame_rate = Some(TypedValue::Text("30000/1001".into()));
        let mut fast = rep(2, 1920, 1080, 5_000_000);
        fast.frame_rate = Some(TypedValue::Integer(60));
        let reps = [slow, fast];
        assert_eq!(select_best_representation(&reps).unwrap().id, TypedValue::Integer(2));
    }
}
