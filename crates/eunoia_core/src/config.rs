use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EunoiaConfig {
    pub gateway: GatewayConfig,
    pub learning: LearningConfig,
    pub persistence: PersistenceConfig,
}

impl EunoiaConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: EunoiaConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, return
    /// defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("EUNOIA_HOST") {
            self.gateway.host = v;
        }
        if let Ok(v) = std::env::var("EUNOIA_PORT") {
            if let Ok(n) = v.parse() {
                self.gateway.port = n;
            }
        }
        if let Ok(v) = std::env::var("EUNOIA_SNAPSHOT_PATH") {
            self.persistence.snapshot_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("EUNOIA_LEARN_INTERVAL_SECS") {
            if let Ok(n) = v.parse() {
                self.learning.interval_secs = n;
            }
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Seconds between scheduled learning cycles.
    pub interval_secs: u64,
    /// Back-off after a failed cycle before retrying.
    pub retry_secs: u64,
    /// Simulated duration of one learning cycle, in milliseconds.
    pub cycle_millis: u64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            retry_secs: 60,
            cycle_millis: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Where the JSON state snapshot is written on shutdown.
    pub snapshot_path: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("data/agent_state.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EunoiaConfig::default();
        assert_eq!(cfg.gateway.port, 8000);
        assert_eq!(cfg.learning.interval_secs, 300);
        assert_eq!(cfg.learning.retry_secs, 60);
        assert_eq!(cfg.learning.cycle_millis, 2000);
        assert_eq!(cfg.persistence.snapshot_path, PathBuf::from("data/agent_state.json"));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let cfg: EunoiaConfig = toml::from_str("[gateway]\nport = 9001\n").unwrap();
        assert_eq!(cfg.gateway.port, 9001);
        assert_eq!(cfg.gateway.host, "0.0.0.0");
        assert_eq!(cfg.learning.interval_secs, 300);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let cfg = EunoiaConfig::load_or_default("/nonexistent/eunoia.toml");
        assert_eq!(cfg.gateway.port, 8000);
    }
}
