//! Telegram update handlers

pub mod commands;
pub mod schema;
pub mod types;

pub use commands::{handle_start_command, handle_traffic_command};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
