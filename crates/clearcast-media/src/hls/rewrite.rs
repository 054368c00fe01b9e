//! Native HLS playlist rewriting.

use clearcast_common::DecryptionKey;

/// Tag prefixes carrying DRM signaling that no longer applies once segments
/// are served decrypted.
const DROPPED_TAGS: &[&str] = &["#EXT-X-KEY", "#EXT-X-MAP:URI"];

/// Rewrite an upstream HLS playlist so every segment is fetched back through
/// the gateway with `key` attached.
///
/// Key and map tags are removed. Each URI line gets `.ts` appended when it
/// names an `.m4s` segment, then `?key=<key>`. Comments and blank lines pass
/// through and line order is preserved.
///
/// # Examples
///
/// ```
/// use clearcast_media::rewrite_hls_playlist;
///
/// let key = "00000000000000000000000000000000".parse().unwrap();
/// let out = rewrite_hls_playlist("#EXT-X-KEY:METHOD=SAMPLE-AES\nseg1.m4s\n", &key);
/// assert_eq!(out, "seg1.m4s.ts?key=00000000000000000000000000000000\n");
/// ```
pub fn rewrite_hls_playlist(text: &str, key: &DecryptionKey) -> String {
    text.split('\n')
        .filter(|line| !DROPPED_TAGS.iter().any(|tag| line.starts_with(tag)))
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                line.to_string()
            } else {
                let suffix = if line.ends_with(".m4s") { ".ts" } else { "" };
                format!("{line}{suffix}?key={key}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
