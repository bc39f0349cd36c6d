//! Configuration management for erweapons CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Source directory used when neither a flag nor the config names one
pub const DEFAULT_DATA_DIR: &str = "data";

/// Artifact path used when neither a flag nor the config names one
pub const DEFAULT_OUTPUT: &str = "weaponData.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub pretty: bool,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("erweapons");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or the default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Source directory: flag, then config, then [`DEFAULT_DATA_DIR`]
    pub fn data_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Artifact path: flag, then config, then [`DEFAULT_OUTPUT`]
    pub fn output(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/sheets")),
            output: None,
            pretty: true,
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "output = \"public/weaponData.json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output, Some(PathBuf::from("public/weaponData.json")));
        assert!(!config.pretty);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "pretty = \"sometimes\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_flag_overrides_config() {
        let config = Config {
            data_dir: Some(PathBuf::from("configured")),
            output: None,
            pretty: false,
        };

        assert_eq!(config.data_dir(Some(PathBuf::from("flag"))), PathBuf::from("flag"));
        assert_eq!(config.data_dir(None), PathBuf::from("configured"));
        assert_eq!(config.output(None), PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(Config::default().data_dir(None), PathBuf::from(DEFAULT_DATA_DIR));
    }
}
