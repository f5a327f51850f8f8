//! Traffic report rendering.
//!
//! The report is one message: a header, then one section per VPS in the
//! configured order. A failed lookup becomes a section of its own and never
//! hides the others.

use chrono::TimeZone;
use std::fmt::Display;

use super::client::VpsTraffic;
use super::types::ServiceInfo;
use crate::core::utils::{escape_markdown_v2, format_gb, format_usage_percent};

pub const REPORT_TITLE: &str = "搬瓦工 VPS 流量总报告";
const SEPARATOR: &str = "------";
const UNKNOWN: &str = "未知";

/// Markup dialect of a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    /// Telegram MarkdownV2, every dynamic value escaped
    MarkdownV2,
    /// No markup, for the console and as a fallback when Telegram rejects entities
    Plain,
}

impl ReportStyle {
    fn text(self, s: &str) -> String {
        match self {
            ReportStyle::MarkdownV2 => escape_markdown_v2(s),
            ReportStyle::Plain => s.to_string(),
        }
    }

    fn bold(self, s: &str) -> String {
        match self {
            ReportStyle::MarkdownV2 => format!("*{}*", escape_markdown_v2(s)),
            ReportStyle::Plain => s.to_string(),
        }
    }

    fn code(self, s: &str) -> String {
        match self {
            ReportStyle::MarkdownV2 => format!("`{}`", escape_markdown_v2(s)),
            ReportStyle::Plain => s.to_string(),
        }
    }
}

/// Formats a unix timestamp as `%Y-%m-%d` in `tz`.
pub fn format_reset_date<Tz>(timestamp: Option<i64>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .and_then(|ts| tz.timestamp_opt(ts, 0).single())
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn render_info<Tz>(info: &ServiceInfo, style: ReportStyle, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let used_gb = format!("{} GB", format_gb(info.data_counter));
    let total_gb = format!("{} GB", format_gb(info.plan_monthly_data));
    let percent = format!("{}%", format_usage_percent(info.data_counter, info.plan_monthly_data));

    [
        format!(
            "{} {}",
            style.bold("主机:"),
            style.code(info.hostname.as_deref().unwrap_or(UNKNOWN))
        ),
        format!(
            "{} {}",
            style.bold("套餐:"),
            style.code(info.plan.as_deref().unwrap_or(UNKNOWN))
        ),
        format!(
            "{} {} / {}",
            style.text("已用流量:"),
            style.code(&used_gb),
            style.code(&total_gb)
        ),
        format!("{} {}", style.text("使用率:"), style.code(&percent)),
        format!(
            "{} {}",
            style.text("流量重置日期:"),
            style.code(&format_reset_date(info.data_next_reset, tz))
        ),
    ]
    .join("\n")
}

fn render_failure(veid: &str, message: &str, style: ReportStyle) -> String {
    let title = match style {
        ReportStyle::MarkdownV2 => format!("*{} {}{}*", escape_markdown_v2("VPS (VEID:"), style.code(veid), "\\)"),
        ReportStyle::Plain => format!("VPS (VEID: {})", veid),
    };
    format!("{}\n{} {}", title, style.text("查询失败:"), style.code(message))
}

/// Renders the report for `entries`, dates in `tz`.
pub fn render_traffic_report<Tz>(entries: &[VpsTraffic], style: ReportStyle, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut parts = vec![style.bold(REPORT_TITLE)];

    for entry in entries {
        let section = match &entry.result {
            Ok(info) => render_info(info, style, tz),
            Err(e) => render_failure(&entry.veid, &e.user_message(), style),
        };
        parts.push(format!("\n{}\n{}", style.text(SEPARATOR), section));
    }

    parts.join("\n")
}
