//! Command-line arguments for the `calc` binary

use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppConfig, LogLevel};
use crate::error::AppResult;
use crate::theme::ThemeId;

/// calc: four-function calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "calc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Starting theme (1, 2 or 3); skips the color-scheme probe
    #[arg(long, value_name = "1|2|3", value_parser = parse_theme)]
    pub theme: Option<ThemeId>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log file (default: calc.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_theme(value: &str) -> Result<ThemeId, String> {
    let number: u8 = value
        .parse()
        .map_err(|_| format!("expected 1, 2 or 3, got {value:?}"))?;
    ThemeId::from_number(number).map_err(|e| e.to_string())
}

impl Cli {
    /// Builds the effective configuration: the `--config` file if given,
    /// then flags on top
    pub fn resolve_config(&self) -> AppResult<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(theme) = self.theme {
            config = config.with_theme(theme);
        }
        if let Some(path) = &self.log_file {
            config = config.with_log_file(path.clone());
        }
        if self.verbose > 0 {
            config = config.with_log_level(LogLevel::from_verbosity(self.verbose));
        }
        Ok(config)
    }
}
