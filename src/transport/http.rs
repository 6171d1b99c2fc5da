//! Default HTTP transport: GET plus JSON decode over reqwest.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::TransportConfig;
use crate::error::{FetchError, FetchResult};
use crate::transport::Transport;

/// GET-and-parse-JSON transport with connect and request deadlines.
///
/// Every call has a deadline regardless of cancellation, so a dead origin
/// cannot pin a generation forever.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from deadline configuration.
    pub fn new(config: &TransportConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_secs))
            .timeout(Duration::from_secs(config.request_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_json(&self, url: &str, cancel: CancellationToken) -> FetchResult<Value> {
        let request = async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                tracing::debug!(%url, status = status.as_u16(), "non-success response");
                return Err(FetchError::Status {
                    status: status.as_u16(),
                });
            }
            Ok(response.json::<Value>().await?)
        };

        tokio::select! {
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = request => result,
        }
    }
}
