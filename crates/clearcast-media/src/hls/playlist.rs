//! HLS media playlist rendering.

use std::fmt::Write;

/// Target duration announced by synthesized playlists.
pub const TARGET_DURATION: u32 = 10;

/// Protocol version announced by synthesized playlists.
pub const VERSION: u32 = 4;

/// A media playlist for a single (possibly multi-track) rendition.
#[derive(Debug, Clone)]
pub struct MediaPlaylist {
    /// Target duration in seconds.
    pub target_duration: u32,
    /// `#EXT-X-VERSION` value.
    pub version: u32,
    /// Sequence number of the first segment.
    pub media_sequence: i64,
    /// Whether the playlist is complete (`#EXT-X-PLAYLIST-TYPE:VOD` and
    /// `#EXT-X-ENDLIST` are emitted).
    pub vod: bool,
    /// Segment entries.
    pub segments: Vec<SegmentEntry>,
}

impl MediaPlaylist {
    pub fn new(media_sequence: i64, vod: bool) -> Self {
        Self {
            target_duration: TARGET_DURATION,
            version: VERSION,
            media_sequence,
            vod,
            segments: Vec::new(),
        }
    }

    /// Render to M3U8 text. Every line, the last included, is
    /// newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();

        writeln!(out, "#EXTM3U").unwrap();
        writeln!(out, "#EXT-X-TARGETDURATION:{}", self.target_duration).unwrap();
        if self.vod {
            writeln!(out, "#EXT-X-PLAYLIST-TYPE:VOD").unwrap();
        }
        writeln!(out, "#EXT-X-VERSION:{}", self.version).unwrap();
        writeln!(out, "#EXT-X-MEDIA-SEQUENCE:{}", self.media_sequence).unwrap();

        for segment in &self.segments {
            writeln!(out, "#EXTINF:{}", segment.duration).unwrap();
            writeln!(out, "{}", segment.uri).unwrap();
        }

        if self.vod {
            writeln!(out, "#EXT-X-ENDLIST").unwrap();
        }

        out
    }
}

/// A segment entry in the playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentEntry {
    /// Duration in seconds.
    pub duration: f64,
    /// Segment URI.
    pub uri: String,
}
