//! Cooperative cancellation for in-flight ratings.

use core::sync::atomic::{AtomicBool, Ordering};
use std::pin::pin;
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// A cloneable flag that can be raised once and awaited.
///
/// All clones share the same state, so the caller keeps one handle and passes another to
/// [`Evaluator::evaluate_all`](super::Evaluator::evaluate_all).
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called on any clone.
    pub async fn cancelled(&self) {
        let mut notified = pin!(self.inner.notify.notified());

        // register before checking the flag so a concurrent cancel cannot be missed
        let _ = notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }

        notified.await;
    }
}
