//! Request lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! Coordinator starts a network-bound generation:
//!     → cancel.rs: cancel() fires the superseded generation's token
//!     → cancel.rs: signal() mints the new generation's token
//!     → transport observes the token; on cancel it fails fast with a
//!       cancellation error, distinct from a transport error
//!
//! Teardown:
//!     → PollerHandle stops the poll loop and fires the active token
//! ```
//!
//! # Design Decisions
//! - One live token per coordinator at a time
//! - The source is minted lazily; cancel() clears it so the next request
//!   starts with a fresh one

pub mod cancel;

pub use cancel::CancelController;
