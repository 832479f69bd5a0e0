// SPDX-License-Identifier: MPL-2.0
//! Time port used by the polling loop.

use std::future::Future;
use std::time::Duration;

/// Waits between polling attempts. Tests inject a sleeper that returns at
/// once and records the requested durations.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}
