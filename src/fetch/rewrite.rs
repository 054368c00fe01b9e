//! Request URL rewriting for "happy" upstreams.
//!
//! Some origins only serve segments when the filename is preceded by an
//! encoded parent-directory segment. For those hosts `..%2F` is inserted
//! verbatim in front of the segment filename; the result is never
//! normalized.

use clearcast_common::paths::{is_container_segment, strip_query};
use clearcast_common::HostAllowList;
use url::Url;

/// Literal inserted before the filename.
pub const HAPPY_PREFIX: &str = "..%2F";

/// The URL to request for `url`, rewritten when its host matches `happy`
/// and its path names an `.mp4`/`.m4s` segment.
pub fn rewrite_happy_url(url: &str, happy: &HostAllowList) -> String {
    if happy.is_empty() {
        return url.to_string();
    }
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let matches = parsed.host_str().is_some_and(|h| happy.allows(h))
        && is_container_segment(parsed.path());
    if !matches {
        return url.to_string();
    }
    match strip_query(url).rfind('/') {
        Some(slash) => format!("{}{HAPPY_PREFIX}{}", &url[..=slash], &url[slash + 1..]),
        None => url.to_string(),
    }
}
