//! Structured logging for Vault Intel.
//!
//! Scoring code emits `tracing` events (`debug!` per item, `info!` per batch,
//! `warn!` for configuration fallbacks, `error!` for failures caught at the
//! call boundary). This module installs a `tracing-subscriber` formatter for
//! them. `RUST_LOG` overrides the configured level when set.


use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

/// Keeps the non-blocking file writer alive for the lifetime of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Error in subscriber setup
    #[error("Subscriber error: {0}")]
    SubscriberError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the logging system with the given configuration.
///
/// Returns `Ok(())` without changes when a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.stdout && config.file.is_none() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level_to_level(config.level).as_str()));

    let result = match config.format {
        LogFormat::Json => {
            let builder = tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_line_number(true);
            match file_writer(config)? {
                Some(writer) => builder.with_writer(writer).try_init(),
                None => builder.try_init(),
            }
        }
        LogFormat::Compact => {
            let builder = tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .with_target(true);
            match file_writer(config)? {
                Some(writer) => builder.with_ansi(false).with_writer(writer).try_init(),
                None => builder.try_init(),
            }
        }
        LogFormat::Pretty => {
            let builder = tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_line_number(true);
            match file_writer(config)? {
                Some(writer) => builder.with_ansi(false).with_writer(writer).try_init(),
                None => builder.try_init(),
            }
        }
        LogFormat::Default => {
            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true);
            match file_writer(config)? {
                Some(writer) => builder.with_ansi(false).with_writer(writer).try_init(),
                None => builder.try_init(),
            }
        }
    };

    // A subscriber installed by the host application wins.
    if let Err(e) = result {
        if e.to_string().contains("SetGlobalDefaultError")
            || e.to_string().contains("global default trace dispatcher")
        {
            return Ok(());
        }
        return Err(LogError::SubscriberError(e));
    }

    Ok(())
}

/// File writer when file output is configured and stdout is disabled.
///
/// With both enabled stdout wins, matching the single-writer subscriber setup.
fn file_writer(config: &LoggingConfig) -> Result<Option<NonBlocking>> {
    match &config.file {
        Some(path) if !config.stdout => {
            let (writer, guard) = create_non_blocking_file(path)?;
            let _ = FILE_GUARD.set(guard);
            Ok(Some(writer))
        }
        _ => Ok(None),
    }
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path.file_name().ok_or_else(|| {
        LogError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Log file path has no file name: {}", path.display()),
        ))
    })?;

    let file_appender = tracing_appender::rolling::never(
        path.parent().unwrap_or_else(|| Path::new(".")),
        file_name,
    );

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level
        .parse::<LogLevel>()
        .map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

/// Convert a LogLevel to a tracing::Level.
pub fn log_level_to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}
