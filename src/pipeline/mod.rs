//! Segment decryption pipeline.
//!
//! Fetches encrypted init and media segments, decrypts each track with the
//! remuxer, and combines multi-track requests into a single transport stream.

mod segment;

pub use segment::{default_init_url, SegmentPipeline, SegmentRequest};
