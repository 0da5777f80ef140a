//! Application configuration
//!
//! Loaded from `<config_dir>/lifeos/config.toml`. Every field has a default,
//! so a missing file or a partial file is fine. A few environment variables
//! override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingest::DEFAULT_MAX_UPLOAD_BYTES;
use crate::storage::FileStorage;
use crate::study::timer::{DEFAULT_MIN_SESSION_SECONDS, DEFAULT_POMODORO_MINUTES};

pub const DATA_DIR_ENV: &str = "LIFEOS_DATA_DIR";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Data directory not found")]
    DataDirNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: Option<PathBuf>,
    pub max_upload_bytes: u64,
    pub study: StudyConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    pub pomodoro_minutes: u32,
    pub min_session_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_results: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            study: StudyConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            pomodoro_minutes: DEFAULT_POMODORO_MINUTES,
            min_session_seconds: DEFAULT_MIN_SESSION_SECONDS,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_URL.to_string(),
            timeout_secs: 60,
            max_results: 5,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lifeos").join("config.toml"))
    }

    /// Read a config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` (or the default location) and apply environment overrides
    pub fn from_env(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a variable lookup. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get(DATA_DIR_ENV) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(key) = get(API_KEY_ENV).or_else(|| get(FALLBACK_API_KEY_ENV)) {
            self.search.api_key = Some(key);
        }
    }

    /// Configured data directory, or the platform default
    pub fn resolve_data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStorage::default_data_dir().map_err(|_| ConfigError::DataDirNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.max_upload_bytes, 52_428_800);
        assert_eq!(config.study.pomodoro_minutes, 25);
        assert_eq!(config.search.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "max_upload_bytes = 1024\n\n[study]\npomodoro_minutes = 50\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.study.pomodoro_minutes, 50);
        assert_eq!(config.study.min_session_seconds, 60);
        assert_eq!(config.search.max_results, 5);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "max_upload_bytes = \"lots\"").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (DATA_DIR_ENV, "/tmp/lifeos"),
            (API_KEY_ENV, " "),
            (FALLBACK_API_KEY_ENV, "fallback-key"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/lifeos")));
        assert_eq!(config.search.api_key.as_deref(), Some("fallback-key"));
        assert_eq!(
            config.resolve_data_dir().unwrap(),
            PathBuf::from("/tmp/lifeos")
        );
    }
}
