use thiserror::Error;

/// Centralized error types for the application
///
/// Failures of a single KiwiVM lookup are not listed here: they are carried
/// per VPS as [`crate::bwh::BwhError`] and rendered into the report.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Logger setup errors
    #[error("Logger error: {0}")]
    Logger(String),

    /// Anyhow errors (for general error handling)
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Problems found while reading the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more required variables are unset or empty
    #[error("missing required environment variables: {0}")]
    Missing(String),

    /// A variable is set but cannot be used
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
