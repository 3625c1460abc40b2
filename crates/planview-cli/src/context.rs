use planview_core::{NavigatorConfig, PlanviewResult};
use planview_domain::InMemorySource;
use std::path::Path;
use std::sync::Arc;

/// Configuration and data source shared by every command.
pub struct CliContext {
    pub config: NavigatorConfig,
    pub source: Arc<InMemorySource>,
}

impl CliContext {
    /// An explicit config path must load cleanly; the per-user file falls back to defaults.
    pub fn load(config_path: Option<&Path>) -> PlanviewResult<Self> {
        let config = match config_path {
            Some(path) => NavigatorConfig::load_from(path)?,
            None => NavigatorConfig::load(),
        };
        tracing::debug!(?config, "loaded configuration");
        let source = InMemorySource::new().with_latency(config.source_latency());
        Ok(Self {
            config,
            source: Arc::new(source),
        })
    }
}
