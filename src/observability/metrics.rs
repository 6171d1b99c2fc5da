//! Metrics emission for the fetch pipeline.
//!
//! # Metrics
//! - `refetch_fetches_total` (counter): settled generations by outcome
//!   (`success`, `failure`, `cache_hit`)
//! - `refetch_cache_hits_total` / `refetch_cache_misses_total` (counters)
//! - `refetch_cache_size` (gauge): entries stored, expired ones included
//! - `refetch_retries_total` (counter): backoff waits taken
//! - `refetch_stale_discards_total` (counter): superseded results dropped

use metrics::{counter, gauge};

/// Record a settled fetch generation by outcome label.
pub fn record_fetch(outcome: &'static str) {
    counter!("refetch_fetches_total", "outcome" => outcome).increment(1);
}

/// Record a cache lookup result.
pub fn record_cache_lookup(hit: bool) {
    if hit {
        counter!("refetch_cache_hits_total").increment(1);
    } else {
        counter!("refetch_cache_misses_total").increment(1);
    }
}

/// Record the current cache population.
pub fn record_cache_size(len: usize) {
    gauge!("refetch_cache_size").set(len as f64);
}

/// Record one retry (a backoff wait actually taken).
pub fn record_retry() {
    counter!("refetch_retries_total").increment(1);
}

/// Record a superseded result dropped by the generation check.
pub fn record_stale_discard() {
    counter!("refetch_stale_discards_total").increment(1);
}
