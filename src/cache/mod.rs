//! Resource caching subsystem.
//!
//! # Data Flow
//! ```text
//! Coordinator fetch(force=false):
//!     → store.rs get(key): fresh entry? serve it, no network call
//! Coordinator commit / mutate(value):
//!     → store.rs set(key): overwrite entry, restart TTL
//! ```
//!
//! # Design Decisions
//! - Expiry is lazy: an entry past its deadline reads as absent but stays
//!   in the map until the next `set` overwrites it. No sweeper task.
//! - Sharing is explicit: cloning a `ResourceCache` handle shares the
//!   underlying map; there is no process-global singleton.
//! - No size bound. Reclamation is overwrite and `invalidate` only.

pub mod store;

pub use store::ResourceCache;
