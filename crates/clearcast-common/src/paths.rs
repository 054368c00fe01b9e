//! Extension checks for upstream paths.
//!
//! Decisions about how to decode, cache, route or accept an upstream
//! resource are all keyed on the trailing extension of its path.

/// Encrypted container segment extensions.
const CONTAINER_EXTENSIONS: &[&str] = &[".mp4", ".m4s"];

/// Text manifest/playlist extensions.
const TEXT_EXTENSIONS: &[&str] = &[".m3u8", ".mpd"];

/// Lowercased extension of a path including the leading dot, or an empty
/// string when the path has none.
///
/// # Examples
///
/// ```
/// use clearcast_common::paths::extension_of;
///
/// assert_eq!(extension_of("/live/stream.M3U8"), ".m3u8");
/// assert_eq!(extension_of("/live/v1/seg-10.m4s"), ".m4s");
/// assert_eq!(extension_of("/live/v1.0/segment"), "");
/// ```
pub fn extension_of(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(idx) => file_name[idx..].to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Path with its trailing extension removed.
///
/// # Examples
///
/// ```
/// use clearcast_common::paths::strip_extension;
///
/// assert_eq!(strip_extension("/v/seg-1.m4s.ts"), "/v/seg-1.m4s");
/// assert_eq!(strip_extension("/v/seg"), "/v/seg");
/// ```
pub fn strip_extension(path: &str) -> &str {
    let ext = extension_of(path);
    &path[..path.len() - ext.len()]
}

/// Whether the path names an encrypted container segment (`.mp4`/`.m4s`).
pub fn is_container_segment(path: &str) -> bool {
    CONTAINER_EXTENSIONS.contains(&extension_of(path).as_str())
}

/// Whether the path names a text manifest or playlist (`.m3u8`/`.mpd`).
pub fn is_text_manifest(path: &str) -> bool {
    TEXT_EXTENSIONS.contains(&extension_of(path).as_str())
}

/// Directory portion of a URL or path, without the trailing slash.
pub fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// The URL string with any query or fragment removed.
pub fn strip_query(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}
