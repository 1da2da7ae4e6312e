//! src/logging.rs
//! ============================================================================
//! # Logging: Tracing Initialization
//!
//! Builds the crate-wide `tracing` subscriber: an env-filtered fmt layer on
//! stderr plus a non-blocking rolling file appender. Call [`init`] once at
//! startup; the appender worker guard is parked in a process-wide static so
//! buffered log lines are flushed on exit.

use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub log_file_prefix: String,
    pub log_level: String,
    pub rotation: LogRotation,
}

#[derive(Debug, Clone, Copy)]
pub enum LogRotation {
    Never,
    Daily,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            log_file_prefix: "explorer".to_string(),
            log_level: "info".to_string(),
            rotation: LogRotation::Daily,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Failed to create log directory: {0}")]
    DirectoryCreationFailed(#[from] std::io::Error),
}

/// Initialize the global subscriber. Errors if called twice.
pub fn init(config: &LoggerConfig) -> Result<(), LoggingError> {
    std::fs::create_dir_all(&config.log_dir)?;

    let rotation = match config.rotation {
        LogRotation::Never => Rotation::NEVER,
        LogRotation::Daily => Rotation::DAILY,
    };

    let appender =
        RollingFileAppender::new(rotation, &config.log_dir, config.log_file_prefix.clone());
    let (writer, guard) = tracing_appender::non_blocking(appender);

    if LOG_GUARD.set(guard).is_err() {
        return Err(LoggingError::AlreadyInitialized);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    Ok(())
}
