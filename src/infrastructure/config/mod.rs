//! Application configuration.

pub mod app_config;
/// Command line arguments.
pub mod args;
pub mod storage;

pub use app_config::{
    ApiConfig, AppConfig, DEFAULT_API_BASE_URL, LogLevel, ThemeConfig, ThemeMode, UiConfig,
};
pub use args::CliArgs;
pub use storage::{ConfigError, LoadedConfig, StorageManager};
