//! Host checks guarding every outbound fetch.
//!
//! Manifest and base URLs must point at an allow-listed origin, and every
//! asset URL derived from them must stay on the exact same host.

use url::Url;

use crate::{Error, Result};

/// Suffix-based host allow-list.
///
/// A host is admitted when it equals one of the suffixes or ends with
/// `.` followed by one of them, so `cdn.example.com` admits
/// `a.cdn.example.com` but not `cdn.example.com.evil.com` or
/// `evilcdn.example.com`.
#[derive(Debug, Clone, Default)]
pub struct HostAllowList {
    suffixes: Vec<String>,
}

impl HostAllowList {
    /// Build an allow-list from host suffixes. Empty entries are ignored.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = suffixes
            .into_iter()
            .map(|s| s.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { suffixes }
    }

    /// Whether `host` is admitted.
    pub fn allows(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.suffixes.iter().any(|suffix| {
            host == *suffix
                || host
                    .strip_suffix(suffix.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        })
    }

    /// Reject `url` unless its host is admitted.
    pub fn check(&self, url: &Url) -> Result<()> {
        let host = url
            .host_str()
            .ok_or_else(|| Error::validation(format!("URL has no host: {url}")))?;
        if self.allows(host) {
            Ok(())
        } else {
            Err(Error::validation(format!("host '{host}' is not allowed")))
        }
    }

    /// Whether no suffixes are configured (nothing is admitted).
    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

/// Reject `url` unless its hostname is exactly the hostname of `base`.
pub fn require_same_host(base: &Url, url: &Url) -> Result<()> {
    match (base.host_str(), url.host_str()) {
        (Some(expected), Some(actual)) if expected == actual => Ok(()),
        (_, actual) => Err(Error::validation(format!(
            "hostname {} does not match base",
            actual.unwrap_or("<none>")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_admits_subdomains() {
        let hosts = HostAllowList::new(["cdn.example.com"]);
        assert!(hosts.allows("cdn.example.com"));
        assert!(hosts.allows("a.cdn.example.com"));
        assert!(hosts.allows("A.CDN.example.com"));
    }

    #[test]
    fn suffix_rejects_lookalikes() {
        let hosts = HostAllowList::new(["cdn.example.com"]);
        assert!(!hosts.allows("cdn.example.com.evil.com"));
        assert!(!hosts.allows("evilcdn.example.com"));
        assert!(!hosts.allows("example.com"));
    }

    #[test]
    fn empty_list_admits_nothing() {
        let hosts = HostAllowList::new(Vec::<String>::new());
        assert!(hosts.is_empty());
        assert!(!hosts.allows("cdn.example.com"));

        let hosts = HostAllowList::new(["", "  "]);
        assert!(hosts.is_empty());
    }

    #[test]
    fn check_uses_url_host() {
        let hosts = HostAllowList::new(["cdn.example.com"]);
        let ok = Url::parse("https://edge.cdn.example.com/v/manifest.mpd").unwrap();
        let bad = Url::parse("https://cdn.example.com.evil.com/v/manifest.mpd").unwrap();
        assert!(hosts.check(&ok).is_ok());
        assert!(matches!(hosts.check(&bad), Err(Error::Validation(_))));
    }

    #[test]
    fn same_host_is_exact() {
        let base = Url::parse("https://a.cdn.example.com/v/").unwrap();
        let same = base.join("seg/1.m4s").unwrap();
        let other = base.join("https://b.cdn.example.com/v/seg/1.m4s").unwrap();
        assert!(require_same_host(&base, &same).is_ok());
        assert!(require_same_host(&base, &other).is_err());
    }
}
