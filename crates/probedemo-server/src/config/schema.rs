use std::time::Duration;

use serde::Deserialize;
use probedemo_core::error::{ProbeError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub readiness: ReadinessSection,

    #[serde(default)]
    pub greeting: GreetingSection,

    #[serde(default)]
    pub chaos: ChaosSection,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ProbeError::UnsupportedVersion);
        }

        self.readiness.validate()?;
        self.greeting.validate()?;
        self.chaos.validate()?;

        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            readiness: ReadinessSection::default(),
            greeting: GreetingSection::default(),
            chaos: ChaosSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadinessSection {
    #[serde(default = "default_startup_grace_ms")]
    pub startup_grace_ms: u64,
}

impl Default for ReadinessSection {
    fn default() -> Self {
        Self {
            startup_grace_ms: default_startup_grace_ms(),
        }
    }
}

impl ReadinessSection {
    pub fn validate(&self) -> Result<()> {
        if self.startup_grace_ms > 600_000 {
            return Err(ProbeError::BadRequest(
                "readiness.startup_grace_ms must be at most 600000".into(),
            ));
        }
        Ok(())
    }

    pub fn startup_grace(&self) -> Duration {
        Duration::from_millis(self.startup_grace_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GreetingSection {
    #[serde(default = "default_root_delay_min_ms")]
    pub root_delay_min_ms: u64,

    #[serde(default = "default_root_delay_max_ms")]
    pub root_delay_max_ms: u64,

    #[serde(default = "default_named_delay_per_char_ms")]
    pub named_delay_per_char_ms: u64,

    #[serde(default = "default_long_name_threshold")]
    pub long_name_threshold: usize,
}

impl Default for GreetingSection {
    fn default() -> Self {
        Self {
            root_delay_min_ms: default_root_delay_min_ms(),
            root_delay_max_ms: default_root_delay_max_ms(),
            named_delay_per_char_ms: default_named_delay_per_char_ms(),
            long_name_threshold: default_long_name_threshold(),
        }
    }
}

impl GreetingSection {
    pub fn validate(&self) -> Result<()> {
        if self.root_delay_min_ms >= self.root_delay_max_ms {
            return Err(ProbeError::BadRequest(
                "greeting.root_delay_min_ms must be less than root_delay_max_ms".into(),
            ));
        }
        if self.root_delay_max_ms > 60_000 {
            return Err(ProbeError::BadRequest(
                "greeting.root_delay_max_ms must be at most 60000".into(),
            ));
        }
        if self.named_delay_per_char_ms > 1_000 {
            return Err(ProbeError::BadRequest(
                "greeting.named_delay_per_char_ms must be at most 1000".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChaosSection {
    #[serde(default = "default_failure_probability")]
    pub failure_probability: f64,
}

impl Default for ChaosSection {
    fn default() -> Self {
        Self {
            failure_probability: default_failure_probability(),
        }
    }
}

impl ChaosSection {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.failure_probability) {
            return Err(ProbeError::BadRequest(
                "chaos.failure_probability must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_startup_grace_ms() -> u64 {
    30_000
}
fn default_root_delay_min_ms() -> u64 {
    50
}
fn default_root_delay_max_ms() -> u64 {
    200
}
fn default_named_delay_per_char_ms() -> u64 {
    10
}
fn default_long_name_threshold() -> usize {
    10
}
fn default_failure_probability() -> f64 {
    0.5
}
