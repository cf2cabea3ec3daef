use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use interview_bot::domain::keybinding::Keymap;
use interview_bot::infrastructure::config::{LoadedConfig, ThemeMode};
use interview_bot::infrastructure::{AppConfig, CliArgs, InterviewHttpClient, StorageManager};
use interview_bot::presentation::services::{
    MarkdownRenderer, PlainHighlighter, SyntaxHighlighter, SyntectHighlighter,
};
use interview_bot::presentation::theme::{Brightness, Theme};
use interview_bot::presentation::{App, AppSettings};

const BACKGROUND_QUERY_TIMEOUT: Duration = Duration::from_millis(150);

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<LoadedConfig> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut loaded = storage.load_or_default(args.config.as_deref())?;
    loaded.config.merge_with_args(args);
    Ok(loaded)
}

fn resolve_brightness(mode: ThemeMode) -> Brightness {
    match mode {
        ThemeMode::Dark => Brightness::Dark,
        ThemeMode::Light => Brightness::Light,
        ThemeMode::Auto => match termbg::theme(BACKGROUND_QUERY_TIMEOUT) {
            Ok(termbg::Theme::Light) => Brightness::Light,
            Ok(termbg::Theme::Dark) => Brightness::Dark,
            Err(e) => {
                warn!(error = %e, "Could not detect terminal background, assuming dark");
                Brightness::Dark
            }
        },
    }
}

fn create_app(config: AppConfig) -> Result<App> {
    let theme = Theme::new(&config.theme.accent_color, resolve_brightness(config.theme.mode));

    let highlighter: Arc<dyn SyntaxHighlighter> = if config.ui.syntax_highlighting {
        Arc::new(SyntectHighlighter::new(&config.ui.code_theme))
    } else {
        Arc::new(PlainHighlighter)
    };
    let renderer = MarkdownRenderer::with_highlighter(theme, highlighter);

    let (keymap, invalid) = Keymap::with_overrides(&config.keybindings);
    for key in invalid {
        warn!(key = %key, "Ignoring unparseable key binding");
    }

    let client = InterviewHttpClient::new(&config.api.base_url, config.api.request_timeout())?;
    info!(base_url = %config.api.base_url, "Interview service configured");

    let settings = AppSettings {
        theme,
        renderer,
        keymap,
        spinner_interval: config.spinner_interval(),
        job_role: config.job_role,
    };

    Ok(App::new(Arc::new(client), settings))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;

    let LoadedConfig { config, fallback } = load_config()?;
    init_logging(&config)?;

    info!(version = interview_bot::VERSION, "Starting {}", interview_bot::NAME);
    if let Some(e) = fallback {
        warn!(error = %e, "Ignoring config file, using defaults");
        eprintln!("interview-bot: {e}; using default configuration");
    }

    let app = create_app(config)?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
