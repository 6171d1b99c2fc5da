//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals nonzero, delay ordering)
//! - Validate resource URLs handed to coordinators
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the config

use thiserror::Error;
use url::Url;

use crate::config::schema::FetcherConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic violation in a config or resource URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("cache.ttl_ms must be greater than zero")]
    ZeroTtl,

    #[error("polling.deduping_interval_ms must be greater than zero")]
    ZeroPollInterval,

    #[error("retry.max_delay_ms ({max}) must not be below retry.base_delay_ms ({base})")]
    DelayOrdering { base: u64, max: u64 },

    #[error("transport.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("invalid resource url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Check a parsed config for semantic violations, reporting all of them.
pub fn validate_config(config: &FetcherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.cache.ttl_ms == 0 {
        errors.push(ValidationError::ZeroTtl);
    }

    if config.polling.deduping_interval_ms == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if config.retry.max_delay_ms < config.retry.base_delay_ms {
        errors.push(ValidationError::DelayOrdering {
            base: config.retry.base_delay_ms,
            max: config.retry.max_delay_ms,
        });
    }

    if config.transport.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that a resource URL is absolute and parseable before a
/// coordinator accepts it.
pub fn validate_resource_url(url: &str) -> Result<(), ValidationError> {
    Url::parse(url).map(|_| ()).map_err(|e| ValidationError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
