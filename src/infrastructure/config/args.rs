use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command line flags; each overrides the matching config value.
#[derive(Debug, Parser)]
#[command(
    name = "interview-bot",
    version,
    about = "Terminal client for an AI mock-interview service",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Interview service base URL.
    #[arg(long, value_name = "URL", env = "INTERVIEW_API_BASE_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub request_timeout: Option<u64>,

    /// Pre-fill the job role.
    #[arg(short, long, value_name = "ROLE")]
    pub job_role: Option<String>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,

    /// Highlight fenced code blocks by language.
    #[arg(long)]
    pub syntax_highlighting: Option<bool>,
}
