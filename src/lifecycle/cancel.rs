//! Cancellation source management for in-flight requests.

use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Hands out the cancellation token for the active request generation.
///
/// The source is created lazily on first use and shared by every call
/// until [`CancelController::cancel`] fires it, after which the next
/// [`CancelController::signal`] mints a fresh one. Exactly one live token
/// exists per controller at a time.
#[derive(Default)]
pub struct CancelController {
    current: Mutex<Option<CancellationToken>>,
}

impl CancelController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The token for the active request generation.
    pub fn signal(&self) -> CancellationToken {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.get_or_insert_with(CancellationToken::new).clone()
    }

    /// Fire the active token, aborting whatever observes it, and reset the
    /// source so the next `signal()` starts fresh.
    pub fn cancel(&self) {
        let token = self
            .current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(token) = token {
            tracing::debug!("cancelling in-flight request generation");
            token.cancel();
        }
    }
}
