use std::sync::Arc;

use probedemo_core::uptime;

use crate::obs::HelloMetrics;

pub const HEALTHY_MESSAGE: &str = "Service is healthy!";

/// `/health-check` and `/info`. Neither can fail.
pub struct StatusService {
    metrics: Arc<HelloMetrics>,
}

impl StatusService {
    pub fn new(metrics: Arc<HelloMetrics>) -> Self {
        Self { metrics }
    }

    pub fn health_check(&self) -> &'static str {
        self.metrics.health_checks.inc();
        HEALTHY_MESSAGE
    }

    pub fn info(&self) -> String {
        self.metrics.info_requests.inc();
        format!(
            "Probe Demo Service - Uptime: {}, Total Requests: {}, Active: {}",
            uptime::iso8601(self.metrics.uptime()),
            self.metrics.request_count(),
            self.metrics.active_connections(),
        )
    }
}
