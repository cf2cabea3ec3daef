//! Config file schema and defaults.

use crate::domain::keybinding::Action;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;

pub(crate) const APP_NAME: &str = "interview-bot";
pub(crate) const APP_QUALIFIER: &str = "dev";
pub(crate) const APP_ORGANIZATION: &str = "interview-bot";

/// Base URL used when neither the CLI, the environment nor the file set one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from `config.toml` and overridden by CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Job role to pre-fill on the setup screen.
    #[serde(skip)]
    pub job_role: Option<String>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Interview service connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Custom keybindings.
    #[serde(default)]
    pub keybindings: HashMap<String, Action>,
}

/// Interview service connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/api/interview` paths are resolved against.
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. Unset means no client deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Returns configured request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Highlight fenced code blocks by language.
    #[serde(default = "default_true")]
    pub syntax_highlighting: bool,

    /// Syntect theme used for fenced code.
    #[serde(default = "default_code_theme")]
    pub code_theme: String,

    /// Busy spinner frame interval in milliseconds.
    #[serde(default = "default_spinner_interval_ms")]
    pub spinner_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            syntax_highlighting: true,
            code_theme: default_code_theme(),
            spinner_interval_ms: default_spinner_interval_ms(),
        }
    }
}

/// Theme mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Dark mode (default).
    #[default]
    Dark,
    /// Light mode.
    Light,
    /// Detect from the terminal background.
    Auto,
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,

    /// Theme mode (Dark, Light, Auto).
    #[serde(default)]
    pub mode: ThemeMode,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
            mode: ThemeMode::default(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_code_theme() -> String {
    "base16-ocean.dark".to_string()
}

fn default_accent_color() -> String {
    "Cyan".to_string()
}

const fn default_spinner_interval_ms() -> u64 {
    100
}

const fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = args.api_url.filter(|url| !url.trim().is_empty()) {
            self.api.base_url = api_url;
        }
        if let Some(timeout) = args.request_timeout {
            self.api.request_timeout_secs = Some(timeout);
        }
        if let Some(job_role) = args.job_role {
            self.job_role = Some(job_role);
        }
        if let Some(accent_color) = args.accent_color {
            self.theme.accent_color = accent_color;
        }
        if let Some(syntax_highlighting) = args.syntax_highlighting {
            self.ui.syntax_highlighting = syntax_highlighting;
        }
    }

    /// Returns spinner frame interval.
    #[must_use]
    pub fn spinner_interval(&self) -> Duration {
        Duration::from_millis(self.ui.spinner_interval_ms.max(16))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("interview-bot.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            job_role: None,
            log_level: LogLevel::Info,
            api: ApiConfig::default(),
            ui: UiConfig::default(),
            theme: ThemeConfig::default(),
            keybindings: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_sections() {
        let toml_content = r##"
            log_level = "debug"

            [api]
            base_url = "https://interviews.example.com"
            request_timeout_secs = 30

            [ui]
            syntax_highlighting = false

            [theme]
            accent_color = "#ff8800"
            mode = "auto"

            [keybindings]
            "Ctrl+Enter" = "Submit"
            "F2" = "NewInterview"
        "##;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.api.base_url, "https://interviews.example.com");
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(30)));
        assert!(!config.ui.syntax_highlighting);
        assert_eq!(config.ui.code_theme, "base16-ocean.dark");
        assert_eq!(config.theme.mode, ThemeMode::Auto);
        assert_eq!(config.keybindings.get("F2"), Some(&Action::NewInterview));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api.request_timeout(), None);
        assert!(config.ui.syntax_highlighting);
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let api = ApiConfig {
            request_timeout_secs: Some(0),
            ..ApiConfig::default()
        };
        assert_eq!(api.request_timeout(), None);
    }

    #[test]
    fn test_args_override_file() {
        let mut config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://file.example:9000"
            "#,
        )
        .unwrap();

        let args = CliArgs::parse_from([
            "interview-bot",
            "--api-url",
            "http://cli.example:7000",
            "--job-role",
            "Java Engineer",
            "--syntax-highlighting",
            "false",
        ]);
        config.merge_with_args(args);

        assert_eq!(config.api.base_url, "http://cli.example:7000");
        assert_eq!(config.job_role.as_deref(), Some("Java Engineer"));
        assert!(!config.ui.syntax_highlighting);
    }

    #[test]
    fn test_default_config_serializes() {
        let content = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&content).unwrap();

        assert_eq!(parsed.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(parsed.ui.spinner_interval_ms, 100);
    }
}
