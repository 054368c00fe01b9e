//! Clearcast-Common: Shared error type and request validation.
//!
//! This crate provides the pieces every other clearcast crate leans on:
//!
//! - **Error Handling**: The unified [`Error`] enum and [`Result`] alias
//! - **Keys**: Parsing and validation of 128-bit decryption keys
//! - **Hosts**: Host allow-list matching and same-host checks
//! - **Path Utilities**: Extension checks for playlists, manifests and segments
//!
//! # Examples
//!
//! ```
//! use clearcast_common::{DecryptionKey, HostAllowList};
//! use clearcast_common::paths::is_container_segment;
//!
//! let key: DecryptionKey = "00000000000000000000000000000000".parse().unwrap();
//! assert_eq!(key.as_str().len(), 32);
//!
//! let hosts = HostAllowList::new(["cdn.example.com"]);
//! assert!(hosts.allows("a.cdn.example.com"));
//!
//! assert!(is_container_segment("/video/seg-1.m4s"));
//! ```

pub mod error;
pub mod hosts;
pub mod keys;
pub mod paths;

pub use error::{Error, Result};
pub use hosts::{require_same_host, HostAllowList};
pub use keys::{DecryptionKey, KeyList};
