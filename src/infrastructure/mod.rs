//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Interview service HTTP client.
pub mod interview;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use interview::InterviewHttpClient;
