//! Logger Module
//!
//! A logging setup based on `tracing-subscriber` with support for:
//! - Console output with color control (disabled automatically off-TTY)
//! - File output with multiple formats (Full, Compact, JSON)

pub mod config;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the global tracing subscriber with the given configuration.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    match (config.console.enabled, config.file.enabled) {
        (true, true) => init_both(&config, filter)?,
        (true, false) => init_console_only(&config.console, filter),
        (false, true) => init_file_only(&config.file, filter)?,
        (false, false) => anyhow::bail!("At least one output (console or file) must be enabled"),
    }

    Ok(())
}

fn open_log_file(config: &FileConfig) -> anyhow::Result<Arc<File>> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(config.append)
        .truncate(!config.append)
        .write(true)
        .open(&config.path)?;

    Ok(Arc::new(file))
}

fn init_console_only(config: &ConsoleConfig, filter: EnvFilter) {
    let is_tty = std::io::stdout().is_terminal();
    let use_ansi = config.colored && is_tty;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true),
        )
        .init();
}

fn init_file_only(config: &FileConfig, filter: EnvFilter) -> anyhow::Result<()> {
    let writer = open_log_file(config)?;

    match config.format {
        LogFormat::Full => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .with_writer(writer),
                )
                .init();
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .compact()
                        .with_writer(writer),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).json().with_writer(writer))
                .init();
        }
    }

    Ok(())
}

fn init_both(config: &LoggerConfig, filter: EnvFilter) -> anyhow::Result<()> {
    let is_tty = std::io::stdout().is_terminal();
    let use_ansi = config.console.colored && is_tty;
    let writer = open_log_file(&config.file)?;

    // The file layer must be added BEFORE the console layer to avoid ANSI
    // codes leaking into file output: span field formatting follows the
    // first layer's ANSI setting.
    // See: https://github.com/tokio-rs/tracing/issues/1817
    match config.file.format {
        LogFormat::Full => {
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            let console_layer = fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .with(console_layer)
                .init();
        }
        LogFormat::Compact => {
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .compact()
                .with_writer(writer);
            let console_layer = fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .with(console_layer)
                .init();
        }
        LogFormat::Json => {
            let file_layer = fmt::layer().with_ansi(false).json().with_writer(writer);
            let console_layer = fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .with(console_layer)
                .init();
        }
    }

    Ok(())
}
