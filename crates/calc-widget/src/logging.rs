//! Log setup for the `calc` binary
//!
//! The TUI owns the terminal, so logs go to a file without ANSI codes.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Filter from `RUST_LOG` when set and valid, otherwise the configured level
#[must_use]
pub fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter()))
}

/// Installs the global subscriber writing to `config.log_file`.
///
/// Fails if the file cannot be opened or a subscriber is already set.
pub fn init(config: &AppConfig) -> AppResult<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::logging(e.to_string()))
}
