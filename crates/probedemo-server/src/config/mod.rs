//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use probedemo_core::error::{ProbeError, Result};

pub use schema::{ChaosSection, GreetingSection, ReadinessSection, ServerSection, ServiceConfig};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PROBEDEMO_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "probedemo.yaml";

pub fn load_from_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ProbeError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| ProbeError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the config from `PROBEDEMO_CONFIG`, or `probedemo.yaml` in the
/// working directory. Only the default path may be absent.
pub fn load_from_env() -> Result<ServiceConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => load_from_file(&path),
        Err(_) => match fs::metadata(DEFAULT_CONFIG_PATH) {
            Ok(_) => load_from_file(DEFAULT_CONFIG_PATH),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = DEFAULT_CONFIG_PATH, "config file not found, using defaults");
                Ok(ServiceConfig::default())
            }
            Err(e) => Err(ProbeError::Internal(format!("stat config failed: {e}"))),
        },
    }
}
