//! Scratch files for multi-input remuxing.

use std::path::{Path, PathBuf};

use clearcast_common::Result;
use tempfile::NamedTempFile;

/// A uniquely named transport-stream file that is deleted when dropped.
///
/// Holding a `ScratchFile` for the duration of a remux ties the file's
/// lifetime to that call, so it is removed on success, on error and on
/// cancellation alike.
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    /// Create a new file in `dir` holding `data`.
    pub async fn write(dir: &Path, data: &[u8]) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("clearcast-")
            .suffix(".ts")
            .tempfile_in(dir)?;
        tokio::fs::write(file.path(), data).await?;
        Ok(Self { file })
    }

    /// Path of the file on disk.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Directory scratch files go to: `configured`, else the system temp dir.
pub fn scratch_dir(configured: Option<&Path>) -> PathBuf {
    configured
        .map(Path::to_path_buf)
        .unwrap_or_else(std::env::temp_dir)
}
