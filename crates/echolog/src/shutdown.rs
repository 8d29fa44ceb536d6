//! Shutdown utilities for graceful termination.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// A cloneable signal for requesting server shutdown.
///
/// Any clone can trigger shutdown; only the first trigger has effect.
/// Handlers observe it either by polling [`is_shutdown`] or by awaiting
/// [`cancelled`].
///
/// [`is_shutdown`]: ShutdownSignal::is_shutdown
/// [`cancelled`]: ShutdownSignal::cancelled
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    requested: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    /// Creates a signal in the not-requested state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown and wakes every waiter. Idempotent.
    pub fn shutdown(&self) {
        if !self.requested.swap(true, Ordering::AcqRel) {
            self.notify.notify_waiters();
        }
    }

    /// Returns `true` once shutdown has been requested.
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Completes once shutdown has been requested.
    pub async fn cancelled(&self) {
        while !self.is_shutdown() {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before the final flag check so a trigger landing
            // between the check and the await cannot be missed.
            notified.as_mut().enable();
            if self.is_shutdown() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_is_idempotent() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_shutdown());
        signal.shutdown();
        signal.shutdown();
        assert!(signal.is_shutdown());
    }

    #[tokio::test]
    async fn test_cancelled_returns_immediately_after_trigger() {
        let signal = ShutdownSignal::new();
        signal.shutdown();
        tokio::time::timeout(Duration::from_secs(1), signal.cancelled())
            .await
            .expect("cancelled should not block after trigger");
    }

    #[tokio::test]
    async fn test_cancelled_wakes_on_trigger_from_clone() {
        let signal = ShutdownSignal::new();
        let trigger = signal.clone();

        let waiter = tokio::spawn(async move { signal.cancelled().await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.shutdown();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .expect("waiter should not panic");
    }
}
