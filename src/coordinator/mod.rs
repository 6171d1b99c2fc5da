//! Fetch coordination subsystem.
//!
//! # Data Flow
//! ```text
//! fetch(force):
//!     capture generation
//!     → cache fresh & not forced? commit cached value, done
//!     → mark validating
//!     → cancel superseded generation, mint its successor's token
//!     → resilience::RetryExecutor around transport fetch + decode
//!     → still the latest generation?
//!         yes: commit (cache write, state publish, one callback)
//!         no:  discard entirely (no state write, no callback)
//!
//! run(shutdown):
//!     fetch(false) immediately
//!     → every deduping interval: fetch(true)
//!     → shutdown: cancel in-flight work, exit
//! ```
//!
//! # Design Decisions
//! - The generation counter is the only staleness guard; no locking in
//!   the fetch path
//! - Failures become state, never panics: callers read `error` from the
//!   observable view
//! - State is published through a watch channel so any number of
//!   observers can follow the live view

pub mod resource;
pub mod state;

pub use resource::{ErrorCallback, PollerHandle, ResourceCoordinator, SuccessCallback};
pub use state::ResourceState;
