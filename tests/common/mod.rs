//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which starts a wiremock origin, writes an
//! ffmpeg stub script into a temp directory, and builds a full
//! [`AppContext`] whose config points at both.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use clearcast::config::Config;
use clearcast::server::{create_router, AppContext};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const KEY: &str = "0123456789abcdef0123456789abcdef";
pub const OTHER_KEY: &str = "fedcba9876543210fedcba9876543210";

/// Decrypt echoes stdin; combine concatenates every `-i` file in order.
pub const PASSTHROUGH_FFMPEG: &str = r#"#!/bin/sh
prev=""
files=""
for a in "$@"; do
  if [ "$prev" = "-i" ]; then
    if [ "$a" = "pipe:0" ]; then exec cat; fi
    files="$files $a"
  fi
  prev="$a"
done
cat $files
"#;

/// Decrypt succeeds; combine fails with exit code 1.
pub const COMBINE_FAILS_FFMPEG: &str = r#"#!/bin/sh
for a in "$@"; do
  if [ "$a" = "pipe:0" ]; then exec cat; fi
done
echo "Invalid data found when processing input" >&2
exit 1
"#;

/// Test harness around a fake origin and a stubbed ffmpeg.
pub struct TestHarness {
    pub origin: MockServer,
    pub ctx: AppContext,
    pub scratch: TempDir,
    tools: TempDir,
}

impl TestHarness {
    /// Harness with the passthrough ffmpeg stub.
    pub async fn new() -> Self {
        Self::with_ffmpeg(PASSTHROUGH_FFMPEG).await
    }

    /// Harness whose ffmpeg is the given shell script.
    pub async fn with_ffmpeg(script: &str) -> Self {
        let origin = MockServer::start().await;
        let tools = TempDir::new().expect("failed to create tools dir");
        let scratch = TempDir::new().expect("failed to create scratch dir");
        let ffmpeg = write_script(tools.path(), "ffmpeg", script);

        let mut config = Config::default();
        config.upstream.base_url = origin.uri();
        config.upstream.allowed_el_upstreams = vec!["127.0.0.1".to_string()];
        config.tools.ffmpeg_path = Some(ffmpeg);
        config.tools.scratch_dir = Some(scratch.path().to_path_buf());

        let ctx = AppContext::from_config(config).expect("failed to build context");

        Self {
            origin,
            ctx,
            scratch,
            tools,
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone())
    }

    /// Origin base URL, e.g. `http://127.0.0.1:41234`.
    pub fn origin_url(&self) -> String {
        self.origin.uri()
    }

    /// Serve `body` for `GET <path>` on the origin.
    pub async fn serve(&self, at: &str, body: impl Into<Vec<u8>>) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.into()))
            .mount(&self.origin)
            .await;
    }

    /// Number of requests the origin has received.
    pub async fn origin_hits(&self) -> usize {
        self.origin
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    /// Files left in the scratch directory.
    pub fn scratch_entries(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.scratch.path())
            .expect("scratch dir readable")
            .map(|e| e.expect("dir entry").path())
            .collect()
    }

    /// Send a GET through the router.
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, script).expect("failed to write stub");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("failed to chmod stub");
    path
}

/// Build a query string from key/value pairs.
pub fn query(pairs: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        serializer.append_pair(k, v);
    }
    serializer.finish()
}

/// Collect a response body into bytes.
pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Collect a response body into a string.
pub async fn body_to_string(response: axum::response::Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Assert the uniform failure response.
pub async fn assert_rejected(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_to_string(response).await, r#"{"success":false}"#);
}
