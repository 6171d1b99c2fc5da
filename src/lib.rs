//! refetch: client-side data-fetch coordination.
//!
//! Given a resource key and a URL, a [`ResourceCoordinator`] returns the
//! resource's current value, keeps it fresh by polling, dedupes calls
//! through a shared TTL cache, retries transient failures with backoff,
//! and guarantees only the most recent request's result is ever committed.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │               COORDINATOR                     │
//!                    │                                               │
//!   fetch(force) ────┼─▶ generation++ ──▶ cache fresh? ──▶ commit    │
//!                    │                        │ miss                 │
//!                    │                        ▼                      │
//!                    │                 ┌─────────────┐               │
//!                    │                 │ resilience  │── backoff ──┐ │
//!                    │                 │   retry     │◀────────────┘ │
//!                    │                 └──────┬──────┘               │
//!                    │                        ▼                      │
//!                    │                 ┌─────────────┐               │
//!                    │   cancel token ─▶  transport  │─▶ still       │
//!                    │                 │ (GET+JSON)  │   latest?     │
//!                    │                 └─────────────┘   ├─ yes ─▶ commit:
//!                    │                                   │   cache.set
//!                    │                                   │   state publish
//!                    │                                   │   callback
//!                    │                                   └─ no ──▶ discard
//!                    │                                               │
//!                    │  ┌─────────────────────────────────────────┐  │
//!                    │  │          Cross-Cutting Concerns         │  │
//!                    │  │  config   lifecycle   observability     │  │
//!                    │  └─────────────────────────────────────────┘  │
//!                    └───────────────────────────────────────────────┘
//! ```
//!
//! Polling (`run`/`spawn`) layers a fixed-interval forced revalidation on
//! top of `fetch`, torn down through a [`PollerHandle`].

// Core subsystems
pub mod cache;
pub mod coordinator;
pub mod error;
pub mod transport;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use cache::ResourceCache;
pub use config::{FetcherConfig, ValidationError};
pub use coordinator::{PollerHandle, ResourceCoordinator, ResourceState};
pub use error::{FetchError, FetchResult};
pub use lifecycle::CancelController;
pub use resilience::{default_strategy, jittered_strategy, RetryExecutor, RetryStrategy};
pub use transport::{HttpTransport, Transport};
