//! Configuration handling for the app

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment override for the storage directory
pub const DATA_DIR_ENV: &str = "EAREYE_DATA_DIR";

const DEFAULT_SUBMIT_DELAY_MS: u64 = 1000;
const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SUCCESS_DISPLAY_MS: u64 = 3000;

/// User configuration; every field is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the durable storage file
    pub data_dir: Option<PathBuf>,
    /// Simulated submission latency
    pub submit_delay_ms: Option<u64>,
    /// Upper bound on a submission before it counts as failed
    pub submit_timeout_ms: Option<u64>,
    /// How long the success screen stays up
    pub success_display_ms: Option<u64>,
    /// Make the simulated endpoint reject submissions
    pub simulate_failure: Option<bool>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "eareye", "eareye")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location, writing a default
    /// file on first run so there is something to edit
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(_) => {
                let config = Self::default();
                if let Err(e) = config.save() {
                    tracing::warn!("Failed to write default config: {e}");
                }
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, defaulting when the file is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Storage directory: env override, then config, then the platform data dir
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir_with_env(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    fn data_dir_with_env(&self, env: Option<PathBuf>) -> Option<PathBuf> {
        env.or_else(|| self.data_dir.clone()).or_else(|| {
            Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
        })
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms.unwrap_or(DEFAULT_SUBMIT_DELAY_MS))
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms.unwrap_or(DEFAULT_SUBMIT_TIMEOUT_MS))
    }

    pub fn success_display(&self) -> Duration {
        Duration::from_millis(
            self.success_display_ms
                .unwrap_or(DEFAULT_SUCCESS_DISPLAY_MS),
        )
    }

    pub fn simulate_failure(&self) -> bool {
        self.simulate_failure.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.data_dir.is_none());
        assert_eq!(config.submit_delay(), Duration::from_secs(1));
        assert_eq!(config.submit_timeout(), Duration::from_secs(10));
        assert_eq!(config.success_display(), Duration::from_secs(3));
        assert!(!config.simulate_failure());
    }

    #[test]
    fn test_serialization() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/tmp/eareye")),
            submit_delay_ms: Some(250),
            submit_timeout_ms: Some(2000),
            success_display_ms: Some(500),
            simulate_failure: Some(true),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
        assert_eq!(parsed.submit_delay(), Duration::from_millis(250));
        assert!(parsed.simulate_failure());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"submit_delay_ms": 10, "unknown_field": "value"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.submit_delay_ms, Some(10));
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            submit_timeout_ms: Some(42),
            ..Default::default()
        };

        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_data_dir_precedence() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        assert_eq!(
            config.data_dir_with_env(Some(PathBuf::from("/from/env"))),
            Some(PathBuf::from("/from/env"))
        );
        assert_eq!(
            config.data_dir_with_env(None),
            Some(PathBuf::from("/from/config"))
        );
    }
}
