// SPDX-License-Identifier: MPL-2.0
//! Tokio-backed [`Sleeper`].

use crate::application::port::Sleeper;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
