//! Backoff strategies for the retry executor.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::error::FetchError;

/// Maps (attempt number, error) to the wait before the next retry.
///
/// Attempt numbers start at 1 for the first retry. Returning
/// `Duration::ZERO` aborts retrying and propagates the error as-is.
pub type RetryStrategy = Arc<dyn Fn(u32, &FetchError) -> Duration + Send + Sync>;

const DEFAULT_BASE_MS: u64 = 1_000;
const DEFAULT_CAP_MS: u64 = 30_000;

fn is_permanent(error: &FetchError) -> bool {
    error.is_not_found() || error.is_cancelled()
}

/// Default policy: `min(base * 2^attempt, cap)` milliseconds, with zero
/// (no retry) for permanent not-found responses and cancelled requests.
pub fn default_strategy() -> RetryStrategy {
    exponential_strategy(DEFAULT_BASE_MS, DEFAULT_CAP_MS)
}

/// Deterministic exponential backoff capped at `max_ms`.
pub fn exponential_strategy(base_ms: u64, max_ms: u64) -> RetryStrategy {
    Arc::new(move |attempt, error| {
        if is_permanent(error) {
            return Duration::ZERO;
        }
        let exponent = 2u64.saturating_pow(attempt);
        Duration::from_millis(base_ms.saturating_mul(exponent).min(max_ms))
    })
}

/// Exponential backoff with jitter, for spreading retries out when many
/// coordinators poll the same origin.
pub fn jittered_strategy(base_ms: u64, max_ms: u64) -> RetryStrategy {
    Arc::new(move |attempt, error| {
        if is_permanent(error) {
            return Duration::ZERO;
        }
        calculate_backoff(attempt, base_ms, max_ms)
    })
}

/// Build the strategy described by a [`RetryConfig`].
pub fn strategy_from_config(config: &RetryConfig) -> RetryStrategy {
    if config.jitter {
        jittered_strategy(config.base_delay_ms, config.max_delay_ms)
    } else {
        exponential_strategy(config.base_delay_ms, config.max_delay_ms)
    }
}

/// Calculate an exponential backoff delay with 0-10% jitter.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = base_ms.saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(max_ms);

    // Apply jitter (0 to 10% of the delay)
    let jitter_range = capped_delay / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay + jitter)
}
