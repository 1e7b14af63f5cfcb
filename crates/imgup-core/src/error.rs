//! Error types for startup (fatal) and per-URL rewrite (non-fatal) failures.

use std::path::PathBuf;
use thiserror::Error;

/// Failure that aborts the run before any URL is processed.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Required credential variable is not set.
    #[error("{var} environment variable is not set")]
    MissingCredential { var: &'static str },
    /// Config file exists but could not be read or parsed.
    #[error("invalid config {}: {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },
    /// Input file could not be opened or read.
    #[error("error reading input file {}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a single rewrite call. Logged and skipped by the pipeline.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// Curl reported an error (connection, DNS, TLS, aborted transfer).
    #[error("request failed: {0}")]
    Transport(#[from] curl::Error),
    /// Service answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u32, message: String },
    /// Request could not be encoded or the response was not a messages response.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Call was aborted through the cancel token.
    #[error("request cancelled")]
    Cancelled,
    /// Service returned no content blocks.
    #[error("no response from model")]
    EmptyResponse,
}

impl RewriteError {
    /// True for transport/service failures; false for an empty response.
    pub fn is_service_error(&self) -> bool {
        !matches!(self, RewriteError::EmptyResponse)
    }
}
