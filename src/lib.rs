//! Clearcast - DRM-stripping DASH/HLS gateway
//!
//! This library crate exposes the gateway for the binary and for
//! integration testing.

pub mod config;
pub mod fetch;
pub mod pipeline;
pub mod server;
