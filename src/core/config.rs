use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::env;
use std::time::Duration;

use crate::core::error::ConfigError;
use crate::telegram::auth::AccessList;

/// Default KiwiVM API base used by BandwagonHost
pub const DEFAULT_BWH_API_URL: &str = "https://api.64clouds.com/v1";

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Unset means console-only logging
pub static LOG_FILE_PATH: Lazy<Option<String>> =
    Lazy::new(|| env::var("LOG_FILE_PATH").ok().filter(|p| !p.trim().is_empty()));

/// Log level (error, warn, info, debug, trace)
/// Read from LOG_LEVEL environment variable
/// Default: info
pub static LOG_LEVEL: Lazy<String> = Lazy::new(|| env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

/// BWH API configuration
pub mod bwh {
    use super::Duration;

    /// Request timeout for a single getServiceInfo call (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 15;

    /// Retries after a transient failure (network error or 5xx)
    pub const MAX_RETRIES: usize = 2;

    /// First backoff delay between retries (in milliseconds)
    pub const RETRY_MIN_DELAY_MS: u64 = 500;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }

    /// First retry delay duration
    pub fn retry_min_delay() -> Duration {
        Duration::from_millis(RETRY_MIN_DELAY_MS)
    }
}

/// Network configuration for the Telegram client
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    /// Must exceed the long polling timeout used by teloxide
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Startup configuration
pub mod startup {
    use super::Duration;

    /// Attempts at reaching the Bot API before giving up
    pub const MAX_BOT_API_ATTEMPTS: u32 = 12;

    /// Delay between Bot API startup attempts (in seconds)
    pub const BOT_API_RETRY_DELAY_SECS: u64 = 5;

    /// Bot API startup retry delay
    pub fn bot_api_retry_delay() -> Duration {
        Duration::from_secs(BOT_API_RETRY_DELAY_SECS)
    }
}

/// KiwiVM API settings, shared by the bot and the console report.
#[derive(Debug, Clone)]
pub struct BwhSettings {
    pub api_key: SecretString,
    pub api_url: String,
    pub veids: Vec<String>,
    pub request_timeout: Duration,
    pub max_retries: usize,
}

impl BwhSettings {
    /// Reads the `BWH_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the `BWH_*` variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_empty(&lookup, "BWH_API_KEY").ok_or_else(|| ConfigError::Missing("BWH_API_KEY".to_string()))?;
        Self::with_api_key(&lookup, api_key)
    }

    fn with_api_key<F>(lookup: &F, api_key: String) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = non_empty(lookup, "BWH_API_URL").unwrap_or_else(|| DEFAULT_BWH_API_URL.to_string());
        url::Url::parse(&api_url).map_err(|e| ConfigError::Invalid {
            key: "BWH_API_URL",
            reason: e.to_string(),
        })?;

        let request_timeout = match non_empty(lookup, "BWH_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("BWH_REQUEST_TIMEOUT_SECS", &raw)?),
            None => bwh::timeout(),
        };
        let max_retries = match non_empty(lookup, "BWH_MAX_RETRIES") {
            Some(raw) => parse_number("BWH_MAX_RETRIES", &raw)?,
            None => bwh::MAX_RETRIES,
        };

        Ok(Self {
            api_key: SecretString::from(api_key),
            api_url: api_url.trim_end_matches('/').to_string(),
            veids: parse_veids(&lookup("BWH_VEID").unwrap_or_default()),
            request_timeout,
            max_retries,
        })
    }
}

/// Runtime settings of the bot, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: SecretString,
    pub access: AccessList,
    pub bwh: BwhSettings,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the raw value of a key.
    ///
    /// Missing required keys are collected and reported together so the
    /// operator sees every problem at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = non_empty(&lookup, "TELEGRAM_BOT_TOKEN")
            .or_else(|| non_empty(&lookup, "BOT_TOKEN"))
            .or_else(|| non_empty(&lookup, "TELOXIDE_TOKEN"));
        let api_key = non_empty(&lookup, "BWH_API_KEY");
        let access = parse_access_list(&lookup("TELEGRAM_CHAT_ID").unwrap_or_default())?;

        let mut missing = Vec::new();
        if api_key.is_none() {
            missing.push("BWH_API_KEY");
        }
        if bot_token.is_none() {
            missing.push("TELEGRAM_BOT_TOKEN");
        }
        if access.is_empty() {
            missing.push("TELEGRAM_CHAT_ID");
        }

        match (bot_token, api_key) {
            (Some(bot_token), Some(api_key)) if missing.is_empty() => Ok(Self {
                bot_token: SecretString::from(bot_token),
                access,
                bwh: BwhSettings::with_api_key(&lookup, api_key)?,
            }),
            _ => Err(ConfigError::Missing(missing.join(", "))),
        }
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Splits a comma-separated VEID list, dropping blank entries.
pub fn parse_veids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|veid| !veid.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a comma-separated list of Telegram user ids.
pub fn parse_access_list(raw: &str) -> Result<AccessList, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<i64>().map_err(|_| ConfigError::Invalid {
                key: "TELEGRAM_CHAT_ID",
                reason: format!("'{}' is not a Telegram user id", id),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(AccessList::new)
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse::<T>().map_err(|_| ConfigError::Invalid {
        key,
        reason: format!("'{}' is not a valid number", raw),
    })
}
