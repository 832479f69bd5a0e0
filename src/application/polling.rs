// SPDX-License-Identifier: MPL-2.0
//! Bounded, cancellable retry loop.
//!
//! The inbox is filled by an external receiver at an unknown time, and the
//! OCR backend can be briefly unavailable. [`poll_until_ready`] retries an
//! operation while it fails with a transient error, waiting a fixed interval
//! between attempts.

use crate::application::port::Sleeper;
use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

/// How often and how many times to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait between two attempts.
    pub interval: Duration,

    /// Total attempts before giving up. `None` retries until cancelled.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(interval: Duration, max_attempts: Option<u32>) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

// =============================================================================
// Cancellation
// =============================================================================

/// Creates a linked cancellation pair.
#[must_use]
pub fn cancellation() -> (CancelHandle, Cancellation) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, Cancellation { rx })
}

/// Triggers cancellation. Cancelling twice is harmless.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Observes cancellation.
///
/// If the [`CancelHandle`] is dropped without cancelling, the token simply
/// never fires.
#[derive(Debug, Clone)]
pub struct Cancellation {
    rx: watch::Receiver<bool>,
}

impl Cancellation {
    /// A token that can never be cancelled.
    #[must_use]
    pub fn never() -> Self {
        let (_handle, token) = cancellation();
        token
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&mut self) {
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // Handle dropped without cancelling.
            std::future::pending::<()>().await;
        }
    }
}

// =============================================================================
// Polling
// =============================================================================

/// Runs `operation` until it succeeds, fails persistently, runs out of
/// attempts or is cancelled.
///
/// Only errors for which [`Error::is_transient`] holds are retried.
///
/// # Errors
///
/// - the first non-transient error, unchanged
/// - [`Error::RetriesExhausted`] carrying the last transient error
/// - [`Error::Cancelled`] as soon as cancellation is observed, including in
///   the middle of an attempt or a wait
pub async fn poll_until_ready<T, F, Fut, S>(
    policy: &RetryPolicy,
    sleeper: &S,
    cancellation: &mut Cancellation,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    S: Sleeper,
{
    let mut attempts: u32 = 0;

    loop {
        if cancellation.is_cancelled() {
            return Err(Error::Cancelled);
        }
        attempts = attempts.saturating_add(1);

        let result = tokio::select! {
            biased;
            () = cancellation.cancelled() => return Err(Error::Cancelled),
            result = operation() => result,
        };

        let error = match result {
            Ok(value) => {
                tracing::debug!(attempts, "operation succeeded");
                return Ok(value);
            }
            Err(error) if !error.is_transient() => return Err(error),
            Err(error) => error,
        };

        if policy.exhausted(attempts) {
            tracing::warn!(attempts, error = %error, "giving up");
            return Err(Error::RetriesExhausted {
                attempts,
                last: Box::new(error),
            });
        }

        tracing::info!(
            attempt = attempts,
            retry_in = ?policy.interval,
            error = %error,
            "not ready yet"
        );

        tokio::select! {
            biased;
            () = cancellation.cancelled() => return Err(Error::Cancelled),
            () = sleeper.sleep(policy.interval) => {}
        }
    }
}
