//! The service's metric instruments and shared request counters.
//!
//! `HelloMetrics` is built once per process (or per test) and handed to every
//! handler. All instruments, including both `name_length` series of the
//! named-greeting counter, are registered here so request paths only
//! increment existing handles.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use probedemo_core::clock::{Clock, ProcessStart};
use probedemo_core::error::Result;

use super::metrics::{Counter, MetricsRegistry, Timer};

/// Bucket of the `name_length` label on `hello_named_requests_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameLength {
    Short,
    Long,
}

impl NameLength {
    /// `Long` iff the name has more than `threshold` characters.
    pub fn classify(name: &str, threshold: usize) -> Self {
        if name.chars().count() > threshold {
            NameLength::Long
        } else {
            NameLength::Short
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NameLength::Short => "short",
            NameLength::Long => "long",
        }
    }
}

pub struct HelloMetrics {
    registry: Arc<MetricsRegistry>,
    start: ProcessStart,
    clock: Arc<dyn Clock>,

    request_count: AtomicU64,
    active_connections: Arc<AtomicI64>,

    pub hello: Counter,
    pub errors: Counter,
    pub request_duration: Timer,
    pub named_short: Counter,
    pub named_long: Counter,
    pub health_checks: Counter,
    pub info_requests: Counter,
}

impl HelloMetrics {
    pub fn new(
        registry: Arc<MetricsRegistry>,
        start: ProcessStart,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let hello = registry.counter(
            "hello_requests_total",
            "Total number of hello requests",
            &[("endpoint", "root")],
        )?;
        let errors = registry.counter(
            "hello_errors_total",
            "Total number of hello request errors",
            &[("endpoint", "root")],
        )?;
        let request_duration = registry.timer(
            "hello_request_duration_seconds",
            "Request processing time",
            &[("endpoint", "root")],
        )?;

        let named = |len: NameLength| {
            registry.counter(
                "hello_named_requests_total",
                "Total number of named hello requests",
                &[("endpoint", "named"), ("name_length", len.as_str())],
            )
        };
        let named_short = named(NameLength::Short)?;
        let named_long = named(NameLength::Long)?;

        let health_checks = registry.counter(
            "health_check_requests_total",
            "Total number of health check requests",
            &[("endpoint", "health")],
        )?;
        let info_requests = registry.counter(
            "info_requests_total",
            "Total number of info requests",
            &[("endpoint", "info")],
        )?;

        let active_connections = Arc::new(AtomicI64::new(0));
        {
            let active = Arc::clone(&active_connections);
            registry.gauge_fn(
                "hello_active_connections",
                "Number of active connections",
                &[],
                move || active.load(Ordering::Relaxed) as f64,
            )?;
        }
        {
            let clock = Arc::clone(&clock);
            registry.gauge_fn(
                "hello_service_uptime_seconds",
                "Service uptime in seconds",
                &[],
                move || start.elapsed_at(clock.now()).as_millis() as f64 / 1000.0,
            )?;
        }

        Ok(Self {
            registry,
            start,
            clock,
            request_count: AtomicU64::new(0),
            active_connections,
            hello,
            errors,
            request_duration,
            named_short,
            named_long,
            health_checks,
            info_requests,
        })
    }

    pub fn registry(&self) -> &Arc<MetricsRegistry> {
        &self.registry
    }

    pub fn named(&self, len: NameLength) -> &Counter {
        match len {
            NameLength::Short => &self.named_short,
            NameLength::Long => &self.named_long,
        }
    }

    /// Count one served greeting; returns this request's sequence number.
    pub fn next_request(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    pub fn active_connections(&self) -> i64 {
        self.active_connections.load(Ordering::SeqCst)
    }

    pub fn uptime(&self) -> Duration {
        self.start.elapsed_at(self.clock.now())
    }

    pub(crate) fn connection_opened(&self) {
        self.active_connections.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::SeqCst);
    }
}
