//! Bot initialization
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Startup wait for the Bot API

use std::time::Duration;

use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::types::Me;
use teloxide::utils::command::BotCommands;
use tokio::time::sleep;

use crate::core::config::{self, Config};
use crate::core::error::{AppError, AppResult};

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "可用命令:")]
pub enum Command {
    #[command(description = "开始使用机器人")]
    Start,
    #[command(description = "查询所有 VPS 的流量信息")]
    Traffic,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(AppError)` - Invalid BOT_API_URL or HTTP client setup failure
pub fn create_bot(cfg: &Config) -> AppResult<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(cfg.bot_token.expose_secret(), client);

    // Check if local Bot API server is configured
    let bot = match std::env::var("BOT_API_URL") {
        Ok(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(&bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            bot.set_api_url(url)
        }
        Err(_) => bot,
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

fn is_retryable_startup_error(err: &teloxide::RequestError) -> bool {
    let err_str = err.to_string();
    matches!(err, teloxide::RequestError::Network(_))
        || err_str.contains("restart")
        || err_str.contains("timed out")
        || err_str.contains("Connection refused")
}

/// Fetches bot info, retrying while the Bot API is unreachable
///
/// Invalid tokens and other permanent errors fail immediately.
pub async fn wait_for_bot_api(bot: &Bot) -> AppResult<Me> {
    wait_for_bot_api_with(
        bot,
        config::startup::MAX_BOT_API_ATTEMPTS,
        config::startup::bot_api_retry_delay(),
    )
    .await
}

/// [`wait_for_bot_api`] with an explicit attempt budget and pause.
pub async fn wait_for_bot_api_with(bot: &Bot, max_attempts: u32, delay: Duration) -> AppResult<Me> {
    let mut attempt = 0;

    loop {
        match bot.get_me().await {
            Ok(me) => return Ok(me),
            Err(e) => {
                attempt += 1;
                if attempt >= max_attempts || !is_retryable_startup_error(&e) {
                    log::error!("Failed to connect to Bot API after {} attempts: {}", attempt, e);
                    return Err(AppError::Telegram(e));
                }

                log::warn!(
                    "Bot API not ready (attempt {}/{}): {}. Retrying in {:?}...",
                    attempt,
                    max_attempts,
                    e,
                    delay
                );
                sleep(delay).await;
            }
        }
    }
}
