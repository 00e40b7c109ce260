//! Application configuration management.
//!
//! This module handles loading the optional configuration file, which can
//! override the designee category, registry endpoint and local file
//! locations.
//!
//! Configuration is stored at `~/.config/dpefinder/config.json`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::{DEFAULT_BASE_URL, REQUEST_TIMEOUT_SECS};
use crate::cache::DEFAULT_COUNTRY_ID;

/// Application name used for config/cache/data directory paths
pub const APP_NAME: &str = "dpefinder";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Zip code table file name in the data directory
const ZIP_TABLE_FILE: &str = "zipcodes.json";

/// Registry designee type for designated pilot examiners
pub const DEFAULT_DESIGNEE_TYPE_ID: u32 = 24;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub designee_type_id: Option<u32>,
    pub country_id: Option<u32>,
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub zip_table: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn designee_type_id(&self) -> u32 {
        self.designee_type_id.unwrap_or(DEFAULT_DESIGNEE_TYPE_ID)
    }

    pub fn country_id(&self) -> u32 {
        self.country_id.unwrap_or(DEFAULT_COUNTRY_ID)
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(REQUEST_TIMEOUT_SECS))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn zip_table(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.zip_table {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME).join(ZIP_TABLE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.designee_type_id(), 24);
        assert_eq!(config.country_id(), 184);
        assert_eq!(config.api_base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.designee_type_id.is_none());
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"designee_type_id": 25, "request_timeout_secs": 5, "cache_dir": "/tmp/dpe", "zip_table": "/tmp/zips.json"}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.designee_type_id(), 25);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.cache_dir().unwrap(), PathBuf::from("/tmp/dpe"));
        assert_eq!(config.zip_table().unwrap(), PathBuf::from("/tmp/zips.json"));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
