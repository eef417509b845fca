//! Application configuration.
//!
//! Machine-level overrides live in `~/.config/tgm/config.toml`; everything
//! animation-specific belongs to the preset document instead. A missing
//! config file means defaults; a malformed one is a real error so typos do
//! not silently disappear.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Machine-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font file used by the raster renderers; overrides the built-in
    /// search. The `--font` CLI flag overrides this in turn.
    pub font_path: Option<PathBuf>,
    /// Theme applied when the preset does not name one the binary knows.
    pub default_theme: Option<String>,
}

impl Config {
    /// Path of the config file (`~/.config/tgm/config.toml`).
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("could not determine config directory")?;
        Ok(base.join("tgm").join("config.toml"))
    }

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Write the config, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(&path, raw).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_overrides() {
        let config = Config::default();
        assert!(config.font_path.is_none());
        assert!(config.default_theme.is_none());
    }

    #[test]
    fn toml_roundtrip() {
        let config = Config {
            font_path: Some(PathBuf::from("/tmp/mono.ttf")),
            default_theme: Some("ember".to_string()),
        };
        let raw = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&raw).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let config: Config = toml::from_str("future_knob = 3\n").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn empty_file_is_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }
}
