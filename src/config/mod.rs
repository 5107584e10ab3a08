//! Configuration management module.
//!
//! Handles loading and saving converter settings from a JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::utils::file_helper::DEFAULT_OUTPUT_SUFFIX;

const CONFIG_FILE_NAME: &str = "diacritics_config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Converter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_suffix")]
    pub output_suffix: String,
    #[serde(default)]
    pub overwrite: bool,
    /// Substitute U+FFFD for untranslatable bytes instead of failing.
    ///
    /// Both code page tables map all 256 byte values, so this currently
    /// produces the same output as a strict conversion.
    #[serde(default)]
    pub lossy: bool,
}

fn default_suffix() -> String {
    DEFAULT_OUTPUT_SUFFIX.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_suffix: default_suffix(),
            overwrite: false,
            lossy: false,
        }
    }
}

/// Configuration manager for loading/saving config.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        let config_path = Self::get_exe_directory().join(CONFIG_FILE_NAME);
        Self { config_path }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    /// Get the directory containing the executable.
    fn get_exe_directory() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load configuration from file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path).map_err(|source| ConfigError::Read {
            path: self.config_path.clone(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: self.config_path.clone(),
                source,
            })?;

        // An empty suffix would make the output overwrite the input.
        if config.output_suffix.is_empty() {
            config.output_suffix = default_suffix();
        }

        debug!(path = %self.config_path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        json.and_then(|json| fs::write(&self.config_path, json))
            .map_err(|source| ConfigError::Write {
                path: self.config_path.clone(),
                source,
            })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.output_suffix, "-utf8");
        assert!(!config.overwrite);
        assert!(!config.lossy);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"overwrite": true}"#).unwrap();
        assert!(config.overwrite);
        assert_eq!(config.output_suffix, "-utf8");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("missing.json"));
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join(CONFIG_FILE_NAME));
        let config = Config {
            output_suffix: "-converted".to_string(),
            overwrite: true,
            lossy: true,
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn test_empty_suffix_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"output_suffix": ""}"#).unwrap();
        let config = ConfigManager::with_path(&path).load().unwrap();
        assert_eq!(config.output_suffix, "-utf8");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        let err = ConfigManager::with_path(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
