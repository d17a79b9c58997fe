//! Coalescing timer for bursty input.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// An explicit cancellable timer that coalesces repeated triggers.
///
/// Every [`debounce`](Self::debounce) call cancels the pending timer and
/// schedules a fresh one; the callback runs only after the configured quiet
/// period with no further calls. Used by the data table to avoid
/// re-rendering on every search keystroke.
///
/// Outside a tokio runtime the callback fires immediately; degrading to an
/// undebounced call beats dropping input.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Arc<Mutex<Option<CancellationToken>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Schedule `f` to run after the quiet period, cancelling any pending run.
    pub fn debounce(&self, f: impl FnOnce() + Send + 'static) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = pending.take() {
            token.cancel();
        }

        let Ok(handle) = Handle::try_current() else {
            drop(pending);
            f();
            return;
        };

        let token = CancellationToken::new();
        *pending = Some(token.clone());
        let delay = self.delay;
        handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => f(),
            }
        });
    }

    /// Cancel the pending run, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = pending.take() {
            token.cancel();
        }
    }
}
