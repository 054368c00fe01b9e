//! Common error type used throughout clearcast.
//!
//! Every failure a request can run into lands in one of these variants. The
//! gateway maps all of them to the same client-facing answer, so the variants
//! exist for logging and for tests rather than for status-code selection.

/// Common error type for clearcast.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request input was rejected before any network access.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The origin answered with a non-success status or the transport failed.
    #[error("Upstream fetch failed for {url}: {message}")]
    UpstreamFetch {
        /// The URL that was requested.
        url: String,
        /// Human-readable error description.
        message: String,
    },

    /// The remux process exited unsuccessfully.
    #[error("Remux failed (exit code {})", display_exit_code(.exit_code))]
    Remux {
        /// Process exit code, `None` when terminated by a signal.
        exit_code: Option<i32>,
    },

    /// The DASH manifest was malformed or structurally incomplete.
    #[error("Manifest parse error: {0}")]
    ManifestParse(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new UpstreamFetch error.
    pub fn upstream<U: Into<String>, S: Into<String>>(url: U, msg: S) -> Self {
        Self::UpstreamFetch {
            url: url.into(),
            message: msg.into(),
        }
    }

    /// Create a new ManifestParse error.
    pub fn manifest<S: Into<String>>(msg: S) -> Self {
        Self::ManifestParse(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::UpstreamFetch { .. } => "upstream_fetch_error",
            Error::Remux { .. } => "remux_failure",
            Error::ManifestParse(_) => "manifest_parse_error",
            Error::Io(_) => "io_error",
            Error::Internal(_) => "internal_error",
        }
    }
}

fn display_exit_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string()).unwrap_or_else(|| "none".into())
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
