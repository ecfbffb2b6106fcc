//! Startup-gated readiness.
//!
//! The service reports DOWN until the startup grace period has elapsed, then
//! UP for the rest of its life. Only elapsed time is consulted, so the
//! transition happens once and never reverses.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::clock::ProcessStart;

/// Grace period during which the service claims it is still starting.
pub const STARTUP_GRACE: Duration = Duration::from_millis(30_000);

pub const STARTING_MESSAGE: &str = "Service is still starting up";
pub const READY_MESSAGE: &str = "Service is ready to serve traffic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Up,
    Down,
}

impl Status {
    pub fn is_up(self) -> bool {
        matches!(self, Status::Up)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Details {
    pub startup: &'static str,
    pub uptime: String,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: Status,
    pub details: Details,
}

/// Evaluate readiness for a given elapsed uptime.
pub fn evaluate_elapsed(elapsed: Duration, grace: Duration) -> HealthReport {
    let uptime = format!("{}ms", elapsed.as_millis());
    if elapsed < grace {
        HealthReport {
            status: Status::Down,
            details: Details {
                startup: "starting",
                uptime,
                message: STARTING_MESSAGE,
            },
        }
    } else {
        HealthReport {
            status: Status::Up,
            details: Details {
                startup: "ready",
                uptime,
                message: READY_MESSAGE,
            },
        }
    }
}

/// Evaluate readiness at `now` against the default grace period.
pub fn evaluate(now: Instant, start: ProcessStart) -> HealthReport {
    evaluate_elapsed(start.elapsed_at(now), STARTUP_GRACE)
}

/// Readiness evaluator bound to a configured grace period.
#[derive(Debug, Clone, Copy)]
pub struct ReadinessEvaluator {
    start: ProcessStart,
    grace: Duration,
}

impl ReadinessEvaluator {
    pub fn new(start: ProcessStart, grace: Duration) -> Self {
        Self { start, grace }
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    pub fn evaluate(&self, now: Instant) -> HealthReport {
        evaluate_elapsed(self.start.elapsed_at(now), self.grace)
    }
}
