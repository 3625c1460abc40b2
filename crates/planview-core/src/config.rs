use crate::{PlanviewError, PlanviewResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunables for the navigation engine.
///
/// Every field has a default, so a partial `config.toml` only overrides
/// the keys it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Quiet period before a typed query settles.
    pub debounce_ms: u64,
    /// Fixed height of one list row, in host units.
    pub row_size: u32,
    /// Rows realized beyond each viewport edge.
    pub overscan: usize,
    /// Delay between anchoring a selection and scrolling to it.
    pub scroll_settle_ms: u64,
    /// Rows at the tail that are end-aligned instead of centered.
    pub near_end_threshold: usize,
    /// Sub-objectives per page in the detail table.
    pub page_size: usize,
    pub live_poll_secs: u64,
    /// Artificial latency added by the in-memory data source.
    pub source_latency_ms: u64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            row_size: 1,
            overscan: 10,
            scroll_settle_ms: 100,
            near_end_threshold: 3,
            page_size: 15,
            live_poll_secs: 5,
            source_latency_ms: 0,
        }
    }
}

impl NavigatorConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/planview/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("planview/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("planview\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load from the per-user config file, falling back to defaults.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring config at {}: {}", config_path.display(), e);
                    }
                }
            }
        }
        Self::default()
    }

    /// Load from an explicit path. Unlike [`NavigatorConfig::load`], errors are reported.
    pub fn load_from(path: &Path) -> PlanviewResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| PlanviewError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PlanviewResult<()> {
        if self.row_size == 0 {
            return Err(PlanviewError::Config("row_size must be positive".into()));
        }
        if self.page_size == 0 {
            return Err(PlanviewError::Config("page_size must be positive".into()));
        }
        if self.live_poll_secs == 0 {
            return Err(PlanviewError::Config("live_poll_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }

    pub fn live_poll_interval(&self) -> Duration {
        Duration::from_secs(self.live_poll_secs)
    }

    pub fn source_latency(&self) -> Duration {
        Duration::from_millis(self.source_latency_ms)
    }
}
