//! Lightweight in-process metrics.
//!
//! Metrics are stored as atomics behind registered handles and rendered in
//! Prometheus text format by the `/metrics` handler.

pub mod inspector;
pub mod instruments;
pub mod metrics;

pub use inspector::RegistryInspector;
pub use instruments::{HelloMetrics, NameLength};
pub use metrics::{Counter, MetricsRegistry, Timer};
