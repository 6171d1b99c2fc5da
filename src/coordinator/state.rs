//! Observable per-resource state.

use std::sync::Arc;

use crate::error::FetchError;

/// Live view of one resource: the last committed value, the last settled
/// error, and whether a revalidation is in flight.
///
/// Mutated only by the coordinator in response to fetch lifecycle events.
/// Errors are shared behind `Arc` so snapshots stay cheap to clone.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    /// Last successfully committed value, if any.
    pub data: Option<T>,

    /// Error from the most recent failed generation, if any. A later
    /// success clears it; a failure preserves prior `data`.
    pub error: Option<Arc<FetchError>>,

    /// True while a network-bound fetch for this resource is running.
    pub is_validating: bool,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_validating: false,
        }
    }
}
