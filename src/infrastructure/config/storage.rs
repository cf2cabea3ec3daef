//! Config file discovery and persistence.

use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_FILE_HEADER: &str = "\
# interview-bot configuration
# Command line flags take precedence over values in this file.

";

/// Configuration loading failures.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("malformed config file {}: {source}", path.display())]
    TomlDe {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Configuration plus the error that forced defaults, if any.
#[derive(Debug)]
pub struct LoadedConfig {
    /// Loaded or default configuration.
    pub config: AppConfig,
    /// Parse failure of an existing file; `config` holds defaults when set.
    pub fallback: Option<ConfigError>,
}

/// Locates, creates and reads `config.toml`.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Roots the manager at the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigDirNotFound` when no home directory is known.
    pub fn new() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::with_dir(dirs.config_dir().to_path_buf()))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Roots the manager at `config_dir`.
    #[must_use]
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the configuration directory.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the config file, honouring an explicit override.
    #[must_use]
    pub fn config_path(&self, path_override: Option<&Path>) -> PathBuf {
        path_override.map_or_else(|| self.config_dir.join(CONFIG_FILE_NAME), Path::to_path_buf)
    }

    /// Loads the application configuration.
    ///
    /// A missing file is written with defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TomlDe` if the file does not parse, or another
    /// `ConfigError` if it cannot be read or created.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = self.config_path(path_override);

        if path.exists() {
            return Self::read_config(&path);
        }

        info!(path = %path.display(), "Config file not found, writing defaults");
        let config = AppConfig::default();
        Self::write_config(&path, &config)?;
        Ok(config)
    }

    /// Like [`Self::load_config`], but a malformed file is left untouched and
    /// defaults are used. The parse error is handed back for reporting.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or created.
    pub fn load_or_default(&self, path_override: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        match self.load_config(path_override) {
            Ok(config) => Ok(LoadedConfig {
                config,
                fallback: None,
            }),
            Err(e @ ConfigError::TomlDe { .. }) => Ok(LoadedConfig {
                config: AppConfig::default(),
                fallback: Some(e),
            }),
            Err(e) => Err(e),
        }
    }

    fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str::<AppConfig>(&content).map_err(|source| ConfigError::TomlDe {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), base_url = %config.api.base_url, "Config loaded");
        Ok(config)
    }

    /// Writes through a temp file in the same directory so readers never
    /// observe a partial file.
    fn write_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut content = String::from(DEFAULT_FILE_HEADER);
        content.push_str(&toml::to_string_pretty(config)?);

        let mut temp = tempfile::NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}
