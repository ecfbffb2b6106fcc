use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use probedemo_core::error::Result;

use crate::config::GreetingSection;
use crate::obs::{HelloMetrics, NameLength};
use crate::services::in_flight::InFlight;
use crate::services::pause::Pause;

/// Greeting endpoints: `/` and `/hello/{name}`.
pub struct GreetingService {
    metrics: Arc<HelloMetrics>,
    pause: Arc<dyn Pause>,
    cfg: GreetingSection,
}

impl GreetingService {
    pub fn new(metrics: Arc<HelloMetrics>, pause: Arc<dyn Pause>, cfg: GreetingSection) -> Self {
        Self { metrics, pause, cfg }
    }

    /// Root greeting after a random pause in `[min, max)`.
    pub async fn hello(&self) -> Result<String> {
        let guard = InFlight::begin(&self.metrics);
        self.pause.pause(self.root_delay()).await?;

        self.metrics.hello.inc();
        let n = self.metrics.next_request();
        guard.complete();

        Ok(format!("Hello World! Request #{n} at {}", timestamp()))
    }

    /// Named greeting after a pause proportional to the name's length.
    pub async fn hello_named(&self, name: &str) -> Result<String> {
        let guard = InFlight::begin(&self.metrics);
        self.pause.pause(self.named_delay(name)).await?;

        let bucket = NameLength::classify(name, self.cfg.long_name_threshold);
        self.metrics.named(bucket).inc();
        let n = self.metrics.next_request();
        guard.complete();

        tracing::debug!(name_length = bucket.as_str(), request = n, "named greeting");
        Ok(format!("Hello {name}! Request #{n} at {}", timestamp()))
    }

    fn root_delay(&self) -> Duration {
        let ms = rand::thread_rng().gen_range(self.cfg.root_delay_min_ms..self.cfg.root_delay_max_ms);
        Duration::from_millis(ms)
    }

    pub fn named_delay(&self, name: &str) -> Duration {
        let chars = name.chars().count() as u64;
        Duration::from_millis(chars.saturating_mul(self.cfg.named_delay_per_char_ms))
    }
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.f")
        .to_string()
}
