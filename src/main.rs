use anyhow::Result;
use chrono::Local;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

use bwh_traffic_bot::bwh::{collect_traffic, render_traffic_report, BwhClient, ReportStyle};
use bwh_traffic_bot::cli::{Cli, Commands};
use bwh_traffic_bot::core::config::{self, BwhSettings, Config};
use bwh_traffic_bot::core::{init_logger, log_configuration};
use bwh_traffic_bot::telegram::{create_bot, schema, setup_bot_commands, wait_for_bot_api, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
/// Errors propagate out of `main`, which ends the process with exit status 1.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    init_logger(&config::LOG_LEVEL, config::LOG_FILE_PATH.as_deref())?;

    match cli.command {
        Some(Commands::Report { veids }) => run_report(veids).await,
        Some(Commands::Run) | None => run_bot().await,
    }
}

/// Print a plain-text report for the given VEIDs (or BWH_VEID) to stdout
async fn run_report(veids: Vec<String>) -> Result<()> {
    let settings = BwhSettings::from_env().inspect_err(|e| log::error!("{}", e))?;

    let veids = if veids.is_empty() { settings.veids.clone() } else { veids };
    if veids.is_empty() {
        log::error!("No VEID given: pass --veid or set BWH_VEID");
        anyhow::bail!("no VEID to report on");
    }

    let client = BwhClient::from_settings(&settings)?;
    let entries = collect_traffic(&client, &veids).await;
    println!("{}", render_traffic_report(&entries, ReportStyle::Plain, &Local));
    Ok(())
}

/// Run the bot with long polling until Ctrl-C
async fn run_bot() -> Result<()> {
    let bot_init_start = std::time::Instant::now();
    log::info!("Starting bot...");

    let cfg = Config::from_env()
        .inspect_err(|e| log::error!("{}. Check BWH_API_KEY, TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID.", e))?;
    log_configuration(&cfg);

    let bot = create_bot(&cfg)?;
    let me = wait_for_bot_api(&bot).await?;
    log::info!("Bot username: {:?}, Bot ID: {}", me.username.as_deref(), me.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let client = BwhClient::from_settings(&cfg.bwh)?;
    let deps = HandlerDeps::new(Arc::new(client), cfg.bwh.veids.clone(), cfg.access.clone());

    log::info!("================================================");
    log::info!(
        "Bot initialization complete in {:.2}s, {} VPS configured",
        bot_init_start.elapsed().as_secs_f64(),
        cfg.bwh.veids.len()
    );
    log::info!("Ready to receive updates (long polling)");
    log::info!("================================================");

    // Drop updates queued while the bot was offline
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
