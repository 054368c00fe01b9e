use bytes::Bytes;
use clearcast_av::{Remuxer, ScratchFile};
use clearcast_common::paths::{parent_of, strip_query};
use clearcast_common::{DecryptionKey, Error, Result};
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::fetch::Fetch;

/// One encrypted track of a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRequest {
    /// Initialization segment; the sibling `init.mp4` of `body_url` if unset.
    pub init_url: Option<String>,
    pub body_url: String,
    pub key: DecryptionKey,
}

/// `init.mp4` in the same directory as `body_url`.
pub fn default_init_url(body_url: &str) -> String {
    format!("{}/init.mp4", parent_of(strip_query(body_url)))
}

/// Fetch, decrypt and combine segments.
pub struct SegmentPipeline {
    fetcher: Arc<dyn Fetch>,
    remuxer: Remuxer,
    scratch_dir: PathBuf,
}

impl SegmentPipeline {
    pub fn new(fetcher: Arc<dyn Fetch>, remuxer: Remuxer, scratch_dir: PathBuf) -> Self {
        Self {
            fetcher,
            remuxer,
            scratch_dir,
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Decrypt a single track into an MPEG transport stream.
    ///
    /// The init and body fetches run concurrently; the remuxer starts once
    /// both have arrived.
    pub async fn get_segment(
        &self,
        body_url: &str,
        key: &DecryptionKey,
        init_url: Option<&str>,
    ) -> Result<Bytes> {
        let init_url = init_url
            .map(str::to_string)
            .unwrap_or_else(|| default_init_url(body_url));

        let (init, body) = tokio::try_join!(
            self.fetcher.fetch(&init_url),
            self.fetcher.fetch(body_url)
        )?;

        self.remuxer
            .decrypt(init.into_bytes(), body.into_bytes(), key)
            .await
    }

    /// Decrypt every track concurrently and combine them into one stream.
    ///
    /// Each decrypted track is staged in a scratch file; all of them are
    /// removed before this returns, whatever the outcome.
    pub async fn get_combined_segment(&self, requests: &[SegmentRequest]) -> Result<Bytes> {
        if requests.is_empty() {
            return Err(Error::validation("no tracks requested"));
        }

        let files = try_join_all(requests.iter().map(|request| self.stage_track(request))).await?;
        let paths: Vec<&Path> = files.iter().map(ScratchFile::path).collect();
        tracing::debug!("Combining {} tracks", paths.len());

        let combined = self.remuxer.combine(&paths).await;
        drop(files);
        combined
    }

    async fn stage_track(&self, request: &SegmentRequest) -> Result<ScratchFile> {
        let data = self
            .get_segment(&request.body_url, &request.key, request.init_url.as_deref())
            .await?;
        ScratchFile::write(&self.scratch_dir, &data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_init_url() {
        assert_eq!(
            default_init_url("https://cdn.example.com/v/1/seg-5.m4s"),
            "https://cdn.example.com/v/1/init.mp4"
        );
        assert_eq!(
            default_init_url("https://cdn.example.com/v/seg-5.m4s?p=a/b"),
            "https://cdn.example.com/v/init.mp4"
        );
    }
}
