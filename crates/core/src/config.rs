//! Reader configuration.

use crate::error::{PomscopeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DRAIN_TIMEOUT_ENV: &str = "POMSCOPE_DRAIN_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Upper bound a query waits for pending population tasks.
    pub drain_timeout_ms: u64,
    /// Extension under which a project's descriptor file is served.
    pub descriptor_extension: String,
    /// Name of the population worker thread.
    pub worker_name: String,
    /// Id reported by [`crate::workspace::WorkspaceReader::repository`].
    pub repository_id: String,
    /// File names picked up by workspace-folder discovery.
    pub descriptor_file_names: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            drain_timeout_ms: 5_000,
            descriptor_extension: "pom".to_string(),
            worker_name: "pomscope-population".to_string(),
            repository_id: "workspace".to_string(),
            descriptor_file_names: vec!["pom.xml".to_string()],
        }
    }
}

impl ReaderConfig {
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }

    pub fn with_drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(raw) = std::env::var(DRAIN_TIMEOUT_ENV) {
            self.drain_timeout_ms = raw.trim().parse().map_err(|_| {
                PomscopeError::Config(format!("{DRAIN_TIMEOUT_ENV} is not a number: {raw}"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.descriptor_extension.is_empty() {
            return Err(PomscopeError::Config(
                "descriptor_extension must not be empty".to_string(),
            ));
        }
        if self.worker_name.is_empty() {
            return Err(PomscopeError::Config(
                "worker_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
