//! Output formatting helpers.

use anyhow::Result;
use chrono::{DateTime, NaiveDate};
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a hint to stderr.
pub fn hint(msg: &str) {
    eprintln!("{} {}", "→".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Render a service date as `YYYY-MM-DD`.
///
/// The service sends RFC 3339 timestamps; plain dates pass through and
/// anything else is shown as sent.
pub fn date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_timestamps_as_dates() {
        assert_eq!(date("2026-11-01T00:00:00.000Z"), "2026-11-01");
        assert_eq!(date("2026-11-01T23:30:00+05:45"), "2026-11-01");
        assert_eq!(date("2026-11-01"), "2026-11-01");
        assert_eq!(date("next tuesday"), "next tuesday");
    }
}
