//! Error definitions for the fetch pipeline.

use thiserror::Error;

/// Errors that can occur while fetching a resource.
///
/// Retry exhaustion is intentionally not a variant: the executor surfaces
/// the last underlying error unchanged so callers see what actually went
/// wrong on the final attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-success HTTP status.
    #[error("HTTP status {status}")]
    Status {
        /// The status code carried by the response.
        status: u16,
    },

    /// Network-level failure (connect, timeout, protocol).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request was aborted through its cancellation token.
    #[error("request cancelled")]
    Cancelled,

    /// Response body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status carried by this error, when one is available.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status } => Some(*status),
            FetchError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for a permanent not-found condition. The default retry
    /// strategy declines to retry these.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True when the request was aborted via a cancellation token,
    /// as opposed to failing on the wire.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
