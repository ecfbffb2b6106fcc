//! Startup diagnostic: log which registry implementation was wired in.

use std::sync::Arc;

use super::metrics::MetricsRegistry;

pub struct RegistryInspector {
    registry: Arc<MetricsRegistry>,
}

impl RegistryInspector {
    /// Build the inspector and log the registry once.
    pub fn new(registry: Arc<MetricsRegistry>) -> Self {
        let inspector = Self { registry };
        inspector.inspect();
        inspector
    }

    pub fn type_name(&self) -> &'static str {
        std::any::type_name_of_val(self.registry.as_ref())
    }

    pub fn inspect(&self) {
        tracing::info!(
            registry_type = self.type_name(),
            registry = ?self.registry,
            "metrics registry wired"
        );
    }

    pub fn registry(&self) -> &Arc<MetricsRegistry> {
        &self.registry
    }
}
