use std::sync::Arc;

use rand::Rng;

use probedemo_core::error::{ProbeError, Result};

use crate::config::ChaosSection;
use crate::obs::HelloMetrics;

pub const SURVIVED_MESSAGE: &str = "Error simulation - this time it worked!";

/// `/simulate-error`: counts an error on every call, then fails with the
/// configured probability.
pub struct ChaosService {
    metrics: Arc<HelloMetrics>,
    cfg: ChaosSection,
}

impl ChaosService {
    pub fn new(metrics: Arc<HelloMetrics>, cfg: ChaosSection) -> Self {
        Self { metrics, cfg }
    }

    pub fn simulate_error(&self) -> Result<&'static str> {
        // counted before the coin flip, success included
        self.metrics.errors.inc();

        if rand::thread_rng().gen_bool(self.cfg.failure_probability) {
            tracing::warn!("simulated failure injected");
            return Err(ProbeError::SimulatedFailure);
        }
        Ok(SURVIVED_MESSAGE)
    }
}
