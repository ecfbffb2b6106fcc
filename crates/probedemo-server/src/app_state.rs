//! Shared application state for the probe demo service.
//!
//! One `ProcessStart` is captured here and shared by the readiness probe, the
//! uptime gauge and `/info`. Metric instruments are registered while the state
//! is built; startup errors are returned instead of panicking.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use probedemo_core::clock::{Clock, ProcessStart, SystemClock};
use probedemo_core::error::Result;
use probedemo_core::readiness::{HealthReport, ReadinessEvaluator};

use crate::config::ServiceConfig;
use crate::obs::{HelloMetrics, MetricsRegistry};
use crate::services::{CancellablePause, ChaosService, GreetingService, Pause, StatusService};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    clock: Arc<dyn Clock>,
    readiness: ReadinessEvaluator,
    metrics: Arc<HelloMetrics>,
    greeting: GreetingService,
    status: StatusService,
    chaos: ChaosService,
    shutdown: CancellationToken,
}

impl AppState {
    /// Build state against the system clock.
    pub fn new(cfg: ServiceConfig) -> Result<Self> {
        Self::with_clock(cfg, Arc::new(SystemClock))
    }

    pub fn with_clock(cfg: ServiceConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let shutdown = CancellationToken::new();
        let pause: Arc<dyn Pause> = Arc::new(CancellablePause::new(shutdown.clone()));
        Self::build(cfg, clock, pause, shutdown)
    }

    /// Build state with an explicit pause implementation.
    pub fn build(
        cfg: ServiceConfig,
        clock: Arc<dyn Clock>,
        pause: Arc<dyn Pause>,
        shutdown: CancellationToken,
    ) -> Result<Self> {
        cfg.validate()?;

        // 1) Single source of truth for process start
        let start = ProcessStart::capture(clock.as_ref());
        let readiness = ReadinessEvaluator::new(start, cfg.readiness.startup_grace());

        // 2) Register every instrument up front
        let registry = Arc::new(MetricsRegistry::new());
        let metrics = Arc::new(HelloMetrics::new(registry, start, Arc::clone(&clock))?);

        // 3) Services
        let greeting = GreetingService::new(Arc::clone(&metrics), pause, cfg.greeting.clone());
        let status = StatusService::new(Arc::clone(&metrics));
        let chaos = ChaosService::new(Arc::clone(&metrics), cfg.chaos.clone());

        tracing::debug!(
            series = metrics.registry().series_count(),
            grace_ms = readiness.grace().as_millis() as u64,
            "application state built"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                clock,
                readiness,
                metrics,
                greeting,
                status,
                chaos,
                shutdown,
            }),
        })
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<HelloMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn registry(&self) -> Arc<MetricsRegistry> {
        Arc::clone(self.inner.metrics.registry())
    }

    pub fn greeting(&self) -> &GreetingService {
        &self.inner.greeting
    }

    pub fn status(&self) -> &StatusService {
        &self.inner.status
    }

    pub fn chaos(&self) -> &ChaosService {
        &self.inner.chaos
    }

    pub fn readiness(&self) -> HealthReport {
        self.inner.readiness.evaluate(self.inner.clock.now())
    }

    /// Token cancelled on shutdown; pending simulated work is interrupted.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.inner.shutdown.clone()
    }
}
