// taleterm - terminal client for tagged-text MUD servers
//
// The server streams text as JSON events; markup arrives as tags embedded in
// the text. This client turns that stream into a scrolling transcript.
//
// Architecture:
// - Tags: wire decoding of tagged-text fragments into a typed tree
// - Lines: splitting fragment streams into transcript lines at newlines
// - Session: echo handling, line continuation, bounded output buffer
// - Interpret: tag handlers turning fragments into render primitives
// - TUI (ratatui): draws the transcript; headless mode prints plain text
// - Transport: source tasks (replay, demo) feed actions over an mpsc channel

mod buffer;
mod cli;
mod config;
mod events;
mod headless;
mod interpret;
mod lines;
mod logging;
mod render;
mod session;
mod tags;
mod theme;
mod transport;
mod tui;

use anyhow::{bail, Result};
use clap::Parser;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Handle subcommands first (config --show, --reset, --path)
    if cli::handle_command(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Extract bundled themes on first run
    theme::ensure_themes_extracted();

    // Load configuration, then let flags override it for this run
    let mut config = Config::from_env();
    cli.apply_overrides(&mut config);

    let Some(source) = cli.source(&config) else {
        bail!("Nothing to show: pass --replay <FILE|-> or --demo (see --help)");
    };

    let log_buffer = LogBuffer::new();
    let _file_guard = init_logging(&config, &log_buffer);

    tracing::info!("taleterm {} starting ({})", config::VERSION, source.describe());

    // Bounded channel: the source waits when the consumer falls behind
    let (action_tx, action_rx) = transport::channel();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let label = source.describe();
    let source_handle = transport::spawn(source, action_tx, shutdown_rx);

    let result = if config.enable_tui {
        let app = tui::app::App::new(&config, log_buffer, label);
        tui::run_tui(action_rx, app).await
    } else {
        headless::run_headless(action_rx, &config).await
    };

    // Stop the source; it may already have finished
    let _ = shutdown_tx.send(());
    if let Err(e) = source_handle.await {
        tracing::warn!("Source task ended abnormally: {}", e);
    }

    result
}

/// Initialize tracing with conditional output
///
/// In TUI mode logs go to the in-memory buffer (writing to the terminal would
/// garble the display). In headless mode they go to stderr so stdout carries
/// only the transcript. File logging optionally adds a rotating JSON file.
///
/// Precedence: RUST_LOG env var > config file > default "info"
///
/// The returned guard must be kept alive for file logs to flush.
fn init_logging(
    config: &Config,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("taleterm={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = config
        .enable_tui
        .then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer = (!config.enable_tui)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let mut guard = None;
    let file_layer = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let dir = &config.logging.file_dir;
                let prefix = &config.logging.file_prefix;
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
                    LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
                };

                // Writes happen on a background thread
                let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
                guard = Some(file_guard);

                Some(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
            }
            Err(e) => {
                // Fall back to non-file logging
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
