//! Process clock.
//!
//! `ProcessStart` is captured once at boot and copied into every component
//! that reports uptime. `Clock` supplies "now"; production uses the system
//! monotonic clock, tests use `ManualClock`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Starts at the instant it was created.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset_ms: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_ms: AtomicU64::new(0),
        }
    }

    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.offset_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

/// Instant the process (or test fixture) came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStart(Instant);

impl ProcessStart {
    pub fn capture(clock: &dyn Clock) -> Self {
        Self(clock.now())
    }

    pub fn instant(&self) -> Instant {
        self.0
    }

    /// Elapsed time since start; zero if `now` predates the start.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_on_advance() {
        let clock = ManualClock::new();
        let start = ProcessStart::capture(&clock);
        assert_eq!(start.elapsed_at(clock.now()), Duration::ZERO);

        clock.advance(Duration::from_millis(1500));
        assert_eq!(start.elapsed_at(clock.now()), Duration::from_millis(1500));
    }

    #[test]
    fn elapsed_before_start_saturates() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(5));
        let start = ProcessStart::capture(&clock);
        let earlier = start.instant() - Duration::from_secs(1);
        assert_eq!(start.elapsed_at(earlier), Duration::ZERO);
    }
}
