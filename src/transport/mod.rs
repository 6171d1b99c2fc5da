//! Transport seam between the coordinator and the network.
//!
//! # Design Decisions
//! - The trait normalizes responses to raw JSON; the coordinator owns
//!   decoding into the caller's type, so one transport serves any resource
//! - Non-success statuses must surface as `FetchError::Status`; the
//!   retry strategy reads the code to suppress retries on not-found
//! - Token cancellation must surface as `FetchError::Cancelled`, never as
//!   a generic I/O failure

pub mod http;

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::FetchResult;

pub use http::HttpTransport;

/// Retrieves the raw JSON document behind a resource URL.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url`, honoring `cancel` at every suspension point.
    async fn fetch_json(&self, url: &str, cancel: CancellationToken) -> FetchResult<Value>;
}
