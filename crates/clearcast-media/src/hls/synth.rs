//! HLS playlist synthesis from a parsed DASH manifest.
//!
//! Each synthesized segment points back at the gateway's `/el` endpoint with
//! the base directory, the per-track init and media URLs, and the keys, so
//! the gateway can fetch, decrypt and combine every track of that segment
//! number in one request.

use clearcast_common::paths::strip_query;
use clearcast_common::{Error, KeyList, Result};
use clearcast_manifest::{Manifest, Representation};
use url::form_urlencoded;
use url::Url;

use super::playlist::{MediaPlaylist, SegmentEntry};

/// Segments announced when no explicit start is requested.
const DEFAULT_WINDOW_SPAN: i64 = 4;

/// Most segments a single playlist announces; older numbers are dropped.
pub const MAX_WINDOW_SEGMENTS: i64 = 10_000;

/// Path of the gateway endpoint serving combined segments.
pub const SEGMENT_ENDPOINT: &str = "/el";

/// Inclusive range of segment numbers a playlist announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistWindow {
    pub start: i64,
    pub end: i64,
}

impl PlaylistWindow {
    /// Clamp a requested window against a representation's start number.
    ///
    /// The end never passes `rep_start`; the start defaults to four segments
    /// before the end and never drops below 1. A requested value of zero is
    /// treated as absent. At most [`MAX_WINDOW_SEGMENTS`] numbers are kept,
    /// the newest ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use clearcast_media::PlaylistWindow;
    ///
    /// let window = PlaylistWindow::clamp(100, None, None);
    /// assert_eq!((window.start, window.end), (96, 100));
    /// ```
    pub fn clamp(rep_start: i64, requested_start: Option<i64>, requested_end: Option<i64>) -> Self {
        let end = requested_end
            .filter(|n| *n != 0)
            .unwrap_or(rep_start)
            .min(rep_start);
        let start = requested_start
            .filter(|n| *n != 0)
            .unwrap_or(end.saturating_sub(DEFAULT_WINDOW_SPAN))
            .max(1)
            .max(end.saturating_sub(MAX_WINDOW_SEGMENTS - 1));
        Self { start, end }
    }

    /// Segment numbers in ascending order. Empty when `start > end`.
    pub fn numbers(&self) -> impl Iterator<Item = i64> {
        self.start..=self.end
    }
}

/// Directory every relative init/media URL of `manifest` resolves against.
///
/// The manifest URL is joined with the first `BaseURL` (if any), then cut
/// after its last `/`; query and fragment are dropped.
pub fn base_directory(manifest_url: &Url, manifest: &Manifest) -> Result<Url> {
    let base = match manifest.base_urls.first() {
        Some(base_url) => manifest_url
            .join(base_url)
            .map_err(|e| Error::manifest(format!("invalid BaseURL '{base_url}': {e}")))?,
        None => manifest_url.clone(),
    };
    base.join("./")
        .map_err(|e| Error::internal(format!("cannot derive base directory of {base}: {e}")))
}

/// Build the HLS playlist for `window` of `manifest`.
///
/// Timing comes from the best representation of the video adaptation set,
/// or the audio set when there is no video. Every media adaptation set
/// contributes one track to each segment URL.
pub fn synthesize_playlist(
    manifest: &Manifest,
    base_dir: &str,
    keys: &KeyList,
    requested_start: Option<i64>,
    requested_end: Option<i64>,
    vod: bool,
) -> Result<String> {
    let primary = manifest
        .primary_adaptation_set()
        .and_then(|set| set.best_representation())
        .ok_or_else(|| Error::manifest("manifest has no video or audio representation"))?;

    let tracks: Vec<&Representation> = manifest
        .adaptation_sets
        .iter()
        .filter_map(|set| set.best_representation())
        .collect();

    let window = PlaylistWindow::clamp(primary.start_number, requested_start, requested_end);
    let inits: Vec<String> = tracks
        .iter()
        .map(|rep| strip_query(&rep.initialization_url()).to_string())
        .collect();
    let keys_json = to_json(&keys.to_strings())?;
    let inits_json = to_json(&inits)?;

    let mut playlist = MediaPlaylist::new(window.start, vod);
    for number in window.numbers() {
        let bodies: Vec<String> = tracks
            .iter()
            .map(|rep| strip_query(&rep.media_url(number)).to_string())
            .collect();
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("burl", base_dir)
            .append_pair("inits", &inits_json)
            .append_pair("bodies", &to_json(&bodies)?)
            .append_pair("keys", &keys_json)
            .finish();
        playlist.segments.push(SegmentEntry {
            duration: primary.segment_duration,
            uri: format!("{SEGMENT_ENDPOINT}?{query}"),
        });
    }

    Ok(playlist.render())
}

fn to_json(values: &[String]) -> Result<String> {
    serde_json::to_string(values).map_err(|e| Error::internal(format!("JSON encoding failed: {e}")))
}
