//! ffmpeg invocations for decryption and track combining.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use clearcast_common::{DecryptionKey, Result};

use crate::command::ToolCommand;

/// Arguments placed before the inputs of every invocation.
const LEADING_ARGS: &[&str] = &["-loglevel", "error"];

/// Stream-copy into an MPEG transport stream on stdout.
const OUTPUT_ARGS: &[&str] = &["-c", "copy", "-copyts", "-f", "mpegts", "pipe:1"];

/// Drives the external decrypt/remux tool.
#[derive(Debug, Clone)]
pub struct Remuxer {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Remuxer {
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            timeout: None,
        }
    }

    /// Bound each invocation to `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, input_args: Vec<String>) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.program.clone());
        cmd.args(LEADING_ARGS.iter().copied())
            .args(input_args)
            .args(OUTPUT_ARGS.iter().copied());
        if let Some(timeout) = self.timeout {
            cmd.timeout(timeout);
        }
        cmd
    }

    /// Decrypt one fragmented MP4 track (init segment followed by a media
    /// segment, fed on stdin) into a transport stream.
    pub async fn decrypt(&self, init: Bytes, body: Bytes, key: &DecryptionKey) -> Result<Bytes> {
        let mut cmd = self.command(decrypt_input_args(key));
        cmd.stdin(init).stdin(body);
        Ok(cmd.execute().await?.stdout)
    }

    /// Combine already-decrypted transport-stream files into one stream.
    pub async fn combine(&self, inputs: &[&Path]) -> Result<Bytes> {
        let cmd = self.command(combine_input_args(inputs));
        Ok(cmd.execute().await?.stdout)
    }
}

/// Input arguments for a single encrypted MP4 on stdin.
pub fn decrypt_input_args(key: &DecryptionKey) -> Vec<String> {
    vec![
        "-f".into(),
        "mp4".into(),
        "-decryption_key".into(),
        key.to_string(),
        "-i".into(),
        "pipe:0".into(),
    ]
}

/// Input arguments for one named file per track.
pub fn combine_input_args(inputs: &[&Path]) -> Vec<String> {
    inputs
        .iter()
        .flat_map(|p| ["-i".to_string(), p.to_string_lossy().to_string()])
        .collect()
}
