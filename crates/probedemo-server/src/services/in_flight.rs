//! Per-request bookkeeping guard for greeting handlers.
//!
//! Creating the guard opens an active connection. Dropping it closes the
//! connection and records the elapsed time into the request timer, on every
//! exit path including the request future being dropped mid-pause. A guard
//! dropped without `complete()` counts one error.

use tokio::time::Instant;

use crate::obs::HelloMetrics;

pub struct InFlight<'a> {
    metrics: &'a HelloMetrics,
    started: Instant,
    completed: bool,
}

impl<'a> InFlight<'a> {
    pub fn begin(metrics: &'a HelloMetrics) -> Self {
        metrics.connection_opened();
        Self {
            metrics,
            started: Instant::now(),
            completed: false,
        }
    }

    pub fn complete(mut self) {
        self.completed = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.metrics.connection_closed();
        self.metrics.request_duration.record(self.started.elapsed());
        if !self.completed {
            self.metrics.errors.inc();
            tracing::warn!("greeting request interrupted");
        }
    }
}
