//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Fetch attempt:
//!     → retry.rs (invoke the operation)
//!     → On failure: backoff.rs strategy decides the wait
//!         - zero delay: propagate the error, no retry (permanent class)
//!         - positive delay: sleep (cancellable), try again
//!     → Attempts exhausted: propagate the final error unchanged
//! ```
//!
//! # Design Decisions
//! - `max_retries` is a hard ceiling on retries beyond the first attempt
//! - The strategy owns retryability: returning zero is the opt-out for
//!   permanent errors such as not-found
//! - The final error is never wrapped; callers see the real failure

pub mod backoff;
pub mod retry;

pub use backoff::{default_strategy, jittered_strategy, RetryStrategy};
pub use retry::RetryExecutor;
