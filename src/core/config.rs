use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::transport::DEFAULT_BASE_URL;

fn default_base() -> String {
    "USD".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request deadline, none when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Base currency rates are expressed against.
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default)]
    pub api: ApiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base: default_base(),
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config at the default location, or built-in defaults if there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("host", "exchangerate", "exrate")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
base: "EUR"
api:
  base_url: "http://localhost:8080"
  timeout_secs: 5
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.base, "EUR");
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("base: JPY").unwrap();
        assert_eq!(config.base, "JPY");
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.api.base_url, "https://api.exchangerate.host");
        assert!(config.api.timeout().is_none());

        let config: AppConfig = serde_yaml::from_str("api:\n  timeout_secs: 3\n").unwrap();
        assert_eq!(config.base, "USD");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "base: GBP\n")?;

        let config = AppConfig::load_from_path(&path)?;
        assert_eq!(config.base, "GBP");

        let missing = AppConfig::load_from_path(temp_dir.path().join("missing.yaml"));
        assert!(missing.unwrap_err().to_string().contains("Failed to read config file"));
        Ok(())
    }

    #[test]
    fn test_load_from_path_invalid_yaml() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "base: [unclosed\n")?;

        let result = AppConfig::load_from_path(&path);
        assert!(result.unwrap_err().to_string().contains("Failed to parse config file"));
        Ok(())
    }
}
