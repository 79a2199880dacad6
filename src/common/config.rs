//! Settings for the window-management core.
//!
//! Everything has a serde default so a missing or partial config file behaves
//! like the built-in defaults. The shell may also construct settings directly
//! and skip the file entirely.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::model::workspace::WorkspaceId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub focus: FocusSettings,
    pub workspace: WorkspaceSettings,
}

/// Timing policy for the focus arbitrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusSettings {
    /// Keyboard-sourced focus requests arriving within this many milliseconds
    /// of the last mouse-sourced request are dropped.
    pub click_guard_ms: u64,
    /// Trailing-edge debounce window applied per channel.
    pub debounce_ms: u64,
}

impl Default for FocusSettings {
    fn default() -> Self {
        FocusSettings {
            click_guard_ms: 100,
            debounce_ms: 50,
        }
    }
}

impl FocusSettings {
    pub fn click_guard(&self) -> Duration { Duration::from_millis(self.click_guard_ms) }

    pub fn debounce(&self) -> Duration { Duration::from_millis(self.debounce_ms) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    /// Workspace selected at startup.
    pub initial: WorkspaceId,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        WorkspaceSettings {
            initial: WorkspaceId::first(),
        }
    }
}

impl Config {
    /// Default location of the settings file, when the platform exposes a
    /// config directory at all.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("webtop").join("config.toml"))
    }

    pub fn read(path: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Config::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Loads the config file if one exists, falling back to defaults when it
    /// does not. Parse errors are still surfaced; a broken file should not be
    /// silently ignored.
    pub fn load() -> Result<Config, ConfigError> {
        match Config::default_path() {
            Some(path) if path.exists() => Config::read(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Config::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_config_yields_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.focus.click_guard_ms, 100);
        assert_eq!(config.focus.debounce_ms, 50);
        assert_eq!(config.workspace.initial, WorkspaceId::Ws1);
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let config = Config::parse(
            r#"
            [focus]
            click_guard_ms = 250

            [workspace]
            initial = "ws_3"
            "#,
        )
        .unwrap();
        assert_eq!(config.focus.click_guard_ms, 250);
        assert_eq!(config.focus.debounce_ms, 50);
        assert_eq!(config.workspace.initial, WorkspaceId::Ws3);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::parse("focus = nonsense").is_err());
    }

    #[test]
    fn durations_come_from_millis() {
        let settings = FocusSettings::default();
        assert_eq!(settings.click_guard(), std::time::Duration::from_millis(100));
        assert_eq!(settings.debounce(), std::time::Duration::from_millis(50));
    }
}
