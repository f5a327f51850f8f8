//! Telegram bot integration and handlers

pub mod auth;
pub mod bot;
pub mod handlers;
pub mod markdown;

// Re-exports for convenience
pub use auth::AccessList;
pub use bot::{create_bot, setup_bot_commands, wait_for_bot_api, wait_for_bot_api_with, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use teloxide::Bot;
