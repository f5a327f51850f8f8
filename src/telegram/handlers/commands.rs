//! Command handler implementations (/start, /traffic)

use chrono::Local;
use teloxide::prelude::*;
use teloxide::types::{Message, ParseMode};

use super::types::{HandlerDeps, HandlerError};
use crate::bwh::{collect_traffic, render_traffic_report, ReportStyle};
use crate::core::utils::escape_markdown_v2;
use crate::telegram::auth::MSG_UNAUTHORIZED;
use crate::telegram::markdown::send_markdown_or_plain;

pub const MSG_NO_VEIDS: &str = "错误: `BWH_VEID` 环境变量未设置或为空。请确保已配置一个或多个 VEID。";
pub const MSG_QUERYING: &str = "正在查询所有 VPS 的流量信息，请稍候...";

/// Replies with the refusal and returns `false` when the sender is not allowed.
async fn ensure_authorized(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<bool, HandlerError> {
    if deps.access.permits_user(msg.from.as_ref()) {
        return Ok(true);
    }

    let user_id = msg.from.as_ref().map(|u| u.id.0);
    log::warn!("Rejected command from unauthorized user {:?} in chat {}", user_id, msg.chat.id);
    bot.send_message(msg.chat.id, MSG_UNAUTHORIZED).await?;
    Ok(false)
}

/// Greeting text with a mention of `msg`'s sender, in MarkdownV2.
pub fn greeting_markdown(msg: &Message) -> String {
    let mention = match msg.from.as_ref() {
        Some(user) => format!("[{}](tg://user?id={})", escape_markdown_v2(&user.full_name()), user.id.0),
        None => escape_markdown_v2("朋友"),
    };
    format!(
        "你好，{}{} 使用 /traffic 命令来查询所有已配置的搬瓦工 VPS 的实时流量信息。",
        mention,
        escape_markdown_v2("!")
    )
}

/// Handle /start command
pub async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    if !ensure_authorized(bot, msg, deps).await? {
        return Ok(());
    }

    bot.send_message(msg.chat.id, greeting_markdown(msg))
        .parse_mode(ParseMode::MarkdownV2)
        .await?;
    Ok(())
}

/// Handle /traffic command
///
/// Sends a progress notice first, then one message covering every configured
/// VPS. Lookups that fail are reported inline.
pub async fn handle_traffic_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    if !ensure_authorized(bot, msg, deps).await? {
        return Ok(());
    }

    if deps.veids.is_empty() {
        bot.send_message(msg.chat.id, MSG_NO_VEIDS).await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, MSG_QUERYING).await?;

    let entries = collect_traffic(deps.traffic.as_ref(), &deps.veids).await;
    let failed = entries.iter().filter(|e| e.result.is_err()).count();
    log::info!(
        "Traffic report for chat {}: {} VPS, {} failed",
        msg.chat.id,
        entries.len(),
        failed
    );

    let markdown = render_traffic_report(&entries, ReportStyle::MarkdownV2, &Local);
    let plain = render_traffic_report(&entries, ReportStyle::Plain, &Local);
    send_markdown_or_plain(bot, msg.chat.id, markdown, plain).await?;
    Ok(())
}
