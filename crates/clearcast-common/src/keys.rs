//! Decryption key parsing.
//!
//! Keys arrive as query parameters, either a single hex string or a JSON
//! array of hex strings. Every key must be exactly 32 lowercase hex
//! characters (a 128-bit content key).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9a-f]{32}$").expect("static key pattern"));

/// A validated 128-bit content decryption key in lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecryptionKey(String);

impl DecryptionKey {
    /// Borrow the hex form of the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DecryptionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if KEY_PATTERN.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::validation(format!("invalid decryption key '{s}'")))
        }
    }
}

impl fmt::Display for DecryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered, non-empty list of decryption keys, one per track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyList(Vec<DecryptionKey>);

impl KeyList {
    /// Parse a query value holding either one key or a JSON array of keys.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.starts_with('[') {
            let values: Vec<String> = serde_json::from_str(trimmed)
                .map_err(|e| Error::validation(format!("invalid key list: {e}")))?;
            Self::from_strings(values)
        } else {
            Ok(Self(vec![raw.parse::<DecryptionKey>()?]))
        }
    }

    /// Validate an already-split list of keys.
    pub fn from_strings<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = values
            .into_iter()
            .map(|v| v.as_ref().parse())
            .collect::<Result<Vec<DecryptionKey>>>()?;
        if keys.is_empty() {
            return Err(Error::validation("key list is empty"));
        }
        Ok(Self(keys))
    }

    /// Key for the track at `index`.
    ///
    /// Tracks past the end of the list reuse the first key.
    pub fn for_track(&self, index: usize) -> &DecryptionKey {
        self.0.get(index).unwrap_or(&self.0[0])
    }

    /// Number of keys supplied.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no keys are held (never true for a parsed list).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the keys in order.
    pub fn iter(&self) -> impl Iterator<Item = &DecryptionKey> {
        self.0.iter()
    }

    /// The keys as plain strings, suitable for JSON encoding.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|k| k.0.clone()).collect()
    }
}
