use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::RequestError;

fn is_markdown_parse_error(err: &RequestError) -> bool {
    err.to_string().to_lowercase().contains("can't parse entities")
}

/// Send a MarkdownV2 message and fall back to `plain` if Telegram rejects the markup.
pub async fn send_markdown_or_plain(
    bot: &Bot,
    chat_id: ChatId,
    markdown: impl Into<String>,
    plain: impl Into<String>,
) -> ResponseResult<Message> {
    match bot
        .send_message(chat_id, markdown.into())
        .parse_mode(ParseMode::MarkdownV2)
        .await
    {
        Ok(msg) => Ok(msg),
        Err(e) if is_markdown_parse_error(&e) => {
            log::warn!("Telegram rejected MarkdownV2 for chat {}: {}. Resending as plain text", chat_id, e);
            bot.send_message(chat_id, plain.into()).await
        }
        Err(e) => Err(e),
    }
}
