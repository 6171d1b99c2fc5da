//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events: key, generation, attempt)
//!     → metrics.rs (counters and gauges via the metrics facade)
//!
//! Consumers:
//!     → whatever subscriber/exporter the embedding application installs
//! ```
//!
//! # Design Decisions
//! - The crate only emits; installing a subscriber or metrics exporter is
//!   the application's choice
//! - Metric updates are cheap (atomic increments behind the facade)

pub mod logging;
pub mod metrics;
