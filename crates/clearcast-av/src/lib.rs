//! # clearcast-av
//!
//! Subprocess plumbing for the external decrypt/remux tool (ffmpeg).
//!
//! This crate provides:
//! - Tool discovery and version checks
//! - [`ToolCommand`], an async builder that streams stdin and collects stdout
//! - [`Remuxer`], which builds the decrypt and combine invocations
//! - [`ScratchFile`], self-deleting inputs for multi-track combining
//!
//! ## Example
//!
//! ```no_run
//! use clearcast_av::{tools, Remuxer};
//!
//! # async fn example(init: bytes::Bytes, body: bytes::Bytes) -> clearcast_common::Result<()> {
//! let ffmpeg = tools::get_tool_path(tools::FFMPEG, None)?;
//! let key: clearcast_common::DecryptionKey = "00000000000000000000000000000000".parse()?;
//! let ts = Remuxer::new(ffmpeg).decrypt(init, body, &key).await?;
//! println!("{} bytes of MPEG-TS", ts.len());
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod remux;
pub mod scratch;
pub mod tools;

pub use command::{ToolCommand, ToolOutput};
pub use remux::Remuxer;
pub use scratch::{scratch_dir, ScratchFile};
pub use tools::{check_ffmpeg, get_tool_path, require_tool, ToolInfo, FFMPEG};
