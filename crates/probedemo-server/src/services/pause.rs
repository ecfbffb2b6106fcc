//! Simulated work.
//!
//! Handlers "do work" by pausing. The pause is a trait so tests can observe
//! the requested durations, and the production implementation races the
//! timer against the process shutdown token.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use probedemo_core::error::{ProbeError, Result};

#[async_trait]
pub trait Pause: Send + Sync {
    /// Suspend the calling task for `d`. Fails with `Interrupted` if the
    /// pause is cancelled before it elapses.
    async fn pause(&self, d: Duration) -> Result<()>;
}

/// Tokio timer pause, interrupted by a cancellation token.
#[derive(Clone)]
pub struct CancellablePause {
    cancel: CancellationToken,
}

impl CancellablePause {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }
}

#[async_trait]
impl Pause for CancellablePause {
    async fn pause(&self, d: Duration) -> Result<()> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ProbeError::Interrupted),
            _ = tokio::time::sleep(d) => Ok(()),
        }
    }
}
