//! Number formatting and Telegram markup helpers

/// Bytes per gigabyte as KiwiVM counts them (binary).
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts a byte counter to gigabytes with two decimals. `None` counts as zero.
pub fn bytes_to_gb(bytes: Option<u64>) -> f64 {
    match bytes {
        Some(b) => round2(b as f64 / BYTES_PER_GB),
        None => 0.0,
    }
}

/// Share of `total` consumed by `used`, in percent with two decimals.
///
/// Returns 0 when the plan has no quota.
pub fn usage_percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(used as f64 / total as f64 * 100.0)
}

/// Formats a decimal the way the report has always shown it: whole values
/// keep one fractional digit (`256.0`), others print in shortest form
/// (`33.33`).
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Gigabytes for display. A missing counter prints as a bare `0`.
pub fn format_gb(bytes: Option<u64>) -> String {
    match bytes {
        Some(_) => format_decimal(bytes_to_gb(bytes)),
        None => "0".to_string(),
    }
}

/// Usage percentage for display; `0` when there is no quota to measure against.
pub fn format_usage_percent(used: Option<u64>, total: Option<u64>) -> String {
    match total {
        Some(total) if total > 0 => format_decimal(usage_percent(used.unwrap_or(0), total)),
        _ => "0".to_string(),
    }
}

/// Escapes every character reserved by Telegram MarkdownV2.
///
/// Any ASCII character may be escaped anywhere, including inside code
/// spans, so the result is safe for both plain and `code` positions.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        match c {
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|' | '{' | '}'
            | '.' | '!' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}
