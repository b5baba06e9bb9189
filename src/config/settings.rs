//! Application configuration

use anyhow::{Context, Result};
use chatboard_types::DisplayConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::defaults::default_displays;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// How often the event loop prints board changes
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// JSON-lines file used to seed the message log
    #[serde(default)]
    pub message_log: Option<PathBuf>,
    /// Displays; empty means the built-in defaults
    #[serde(default)]
    pub displays: Vec<DisplayConfig>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_tick_ms() -> u64 {
    250
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)?;
        Ok(config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "chatboard", "chatboard")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Check display IDs and timer settings
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for display in &self.displays {
            if !seen.insert(display.id.as_str()) {
                anyhow::bail!("Duplicate display id: {}", display.id);
            }
            display
                .timer_schedule()
                .with_context(|| format!("Display {}", display.id))?;
        }
        if self.tick_ms == 0 {
            anyhow::bail!("tick_ms must be greater than zero");
        }
        Ok(())
    }

    /// Displays to build: the configured ones, or the defaults when none are set
    pub fn effective_displays(&self) -> Vec<DisplayConfig> {
        if self.displays.is_empty() {
            default_displays()
        } else {
            self.displays.clone()
        }
    }

    /// Default configuration with the default displays written out
    pub fn with_default_displays() -> Self {
        Self {
            displays: default_displays(),
            ..Self::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            tick_ms: default_tick_ms(),
            message_log: None,
            displays: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatboard_types::TriggerKind;

    #[test]
    fn test_minimal_config() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.tick_ms, 250);
        assert!(config.displays.is_empty());
        assert_eq!(config.effective_displays().len(), default_displays().len());
    }

    #[test]
    fn test_save_and_load_path() {
        let dir = std::env::temp_dir().join(format!("chatboard-config-{}", std::process::id()));
        let path = dir.join("config.json");

        let mut config = AppConfig::with_default_displays();
        config.displays[0].triggers = TriggerKind::LOGIN;
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();
        assert_eq!(loaded.displays, config.displays);
    }

    #[test]
    fn test_validate_rejects_bad_displays() {
        let mut config = AppConfig::with_default_displays();
        config.displays[1].id = config.displays[0].id.clone();
        assert!(config.validate().is_err());

        let mut config = AppConfig::with_default_displays();
        config.displays[0].timer_interval_ms = Some(0);
        assert!(config.validate().is_err());

        let config = AppConfig {
            tick_ms: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
