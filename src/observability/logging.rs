//! Structured logging initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global tracing subscriber for binaries and tests.
///
/// Honors `RUST_LOG` when set, otherwise filters this crate at `level`.
/// Calling it more than once is a no-op rather than a panic.
pub fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("refetch={}", level).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
