use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CradleConfig {
    /// Base URL of the cradle record service, e.g. "http://localhost:8080"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Settle delay before a feedings-table edit is sent to storage.
    #[serde(default = "default_feeding_save_delay_ms")]
    pub feeding_save_delay_ms: u64,
    /// Settle delay before a sleep-table edit is sent to storage. Each
    /// keystroke restarts the window.
    #[serde(default = "default_sleep_save_delay_ms")]
    pub sleep_save_delay_ms: u64,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_feeding_save_delay_ms() -> u64 {
    0
}

fn default_sleep_save_delay_ms() -> u64 {
    500
}

impl Default for CradleConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            feeding_save_delay_ms: default_feeding_save_delay_ms(),
            sleep_save_delay_ms: default_sleep_save_delay_ms(),
        }
    }
}

impl CradleConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("cradle-tui")
            .join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: CradleConfig = toml::from_str("api_url = \"http://example:9000\"")
            .expect("partial config parses");
        assert_eq!(config.api_url, "http://example:9000");
        assert_eq!(config.feeding_save_delay_ms, 0);
        assert_eq!(config.sleep_save_delay_ms, 500);
    }
}
