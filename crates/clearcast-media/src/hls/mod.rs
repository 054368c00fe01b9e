//! HLS playlist translation.
//!
//! Two directions: native HLS playlists are rewritten in place, and DASH
//! manifests are turned into synthesized HLS playlists.

mod playlist;
mod rewrite;
mod synth;

pub use playlist::{MediaPlaylist, SegmentEntry, TARGET_DURATION, VERSION};
pub use rewrite::rewrite_hls_playlist;
pub use synth::{base_directory, synthesize_playlist, PlaylistWindow, SEGMENT_ENDPOINT};
