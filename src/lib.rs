//! bwh-traffic-bot - Telegram bot for BandwagonHost VPS traffic reports
//!
//! Authorized Telegram users send `/traffic` and receive the monthly
//! transfer usage of every configured VPS, fetched from the KiwiVM API.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging, and formatting helpers
//! - `bwh`: KiwiVM API client and report rendering
//! - `telegram`: Bot setup, access control, and command handlers
//! - `cli`: Command-line interface

pub mod bwh;
pub mod cli;
pub mod core;
pub mod telegram;

// Re-export commonly used types for convenience
pub use bwh::{BwhClient, BwhError, ServiceInfo, TrafficSource};
pub use crate::core::{config, AppError, AppResult, Config};
pub use telegram::{schema, HandlerDeps};
