//! Clearcast-Media: HLS playlist translation
//!
//! This crate turns upstream playlists and manifests into HLS playlists that
//! route every segment back through the gateway for decryption.
//!
//! # Modules
//!
//! - `hls` - playlist rewriting, synthesis and rendering (m3u8)
//!
//! # Architecture
//!
//! Native HLS origins are served by [`rewrite_hls_playlist`], which strips the
//! DRM tags and appends the decryption key to every segment URI.
//!
//! DASH origins are served by [`synthesize_playlist`]:
//!
//! 1. The manifest is parsed by `clearcast-manifest`
//! 2. The video (else audio) set's best representation fixes timing
//! 3. A [`PlaylistWindow`] bounds the announced segment numbers
//! 4. Each segment URI carries every track's init and media URL for `/el`

pub mod hls;

pub use hls::{
    base_directory, rewrite_hls_playlist, synthesize_playlist, MediaPlaylist, PlaylistWindow,
    SegmentEntry,
};
