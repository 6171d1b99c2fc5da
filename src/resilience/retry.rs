//! Retry execution around fallible async operations.

use std::future::Future;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::error::{FetchError, FetchResult};
use crate::observability::metrics;
use crate::resilience::backoff::RetryStrategy;

/// Drives an async operation to success or exhaustion under a pluggable
/// backoff strategy.
///
/// `max_retries` bounds retries beyond the first attempt: a value of `n`
/// allows at most `n + 1` invocations. Between failures the strategy is
/// consulted with the attempt number and the error; a zero delay stops
/// retrying immediately. The executor never swallows an error and never
/// wraps the final one.
pub struct RetryExecutor {
    max_retries: u32,
    strategy: RetryStrategy,
}

impl RetryExecutor {
    pub fn new(max_retries: u32, strategy: RetryStrategy) -> Self {
        Self {
            max_retries,
            strategy,
        }
    }

    /// Retries allowed beyond the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Run `operation` until it succeeds or attempts are exhausted.
    ///
    /// The backoff sleep observes `cancel`, so an aborted generation stops
    /// waiting promptly instead of sleeping out its full delay.
    pub async fn execute<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut operation: F,
    ) -> FetchResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = FetchResult<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if attempt >= self.max_retries {
                tracing::warn!(attempt, error = %error, "attempts exhausted");
                return Err(error);
            }

            attempt += 1;
            let delay = (self.strategy)(attempt, &error);
            if delay.is_zero() {
                tracing::debug!(attempt, error = %error, "strategy declined retry");
                return Err(error);
            }

            metrics::record_retry();
            tracing::debug!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "retrying after backoff"
            );

            tokio::select! {
                _ = cancel.cancelled() => return Err(FetchError::Cancelled),
                _ = time::sleep(delay) => {}
            }
        }
    }
}
