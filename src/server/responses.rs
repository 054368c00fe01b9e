//! Successful response shapes.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

pub const PLAYLIST_MIME: &str = "application/x-mpegURL";
pub const SEGMENT_MIME: &str = "video/mp2t";

/// Playlists are re-fetched almost immediately so live windows advance.
pub const PLAYLIST_CACHE_CONTROL: &str = "public, max-age=1";
pub const SEGMENT_CACHE_CONTROL: &str = "public, max-age=86400";

pub fn playlist(text: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, PLAYLIST_MIME),
            (header::CACHE_CONTROL, PLAYLIST_CACHE_CONTROL),
        ],
        text,
    )
        .into_response()
}

pub fn segment(data: Bytes) -> Response {
    (
        [
            (header::CONTENT_TYPE, SEGMENT_MIME),
            (header::CACHE_CONTROL, SEGMENT_CACHE_CONTROL),
        ],
        data,
    )
        .into_response()
}
