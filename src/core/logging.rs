//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + optional file)
//! - A configuration summary printed once at startup

use simplelog::*;
use std::fs::File;
use std::str::FromStr;

use crate::core::config::Config;
use crate::core::error::{AppError, AppResult};

/// Parses a level name, falling back to `Info` for anything unknown.
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

/// Initialize logger for console output and, when a path is given, a log file
///
/// # Arguments
/// * `level` - Level name (`error`, `warn`, `info`, `debug`, `trace`)
/// * `log_file_path` - Optional path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(AppError)` - Failed to create the file or a logger is already set
pub fn init_logger(level: &str, log_file_path: Option<&str>) -> AppResult<()> {
    let level = parse_level(level);
    let config = ConfigBuilder::new()
        .add_filter_allow_str("bwh_traffic_bot")
        .add_filter_allow_str("teloxide")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file_path {
        let log_file = File::create(path)?;
        loggers.push(WriteLogger::new(level, config, log_file));
    }

    CombinedLogger::init(loggers).map_err(|e| AppError::Logger(e.to_string()))
}

/// Logs the effective configuration at application startup
///
/// Only counts and the API base are printed; the bot token and API key never are.
pub fn log_configuration(config: &Config) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("BWH API: {}", config.bwh.api_url);
    if config.bwh.veids.is_empty() {
        log::warn!("BWH_VEID: not set, /traffic will report a configuration error");
    } else {
        log::info!("BWH_VEID: {} VPS configured", config.bwh.veids.len());
    }
    log::info!("Authorized users: {}", config.access.len());
    log::info!(
        "Request timeout: {}s, retries: {}",
        config.bwh.request_timeout.as_secs(),
        config.bwh.max_retries
    );
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
