//! Publication date parsing and formatting.
//!
//! Front matter dates are stored as epoch milliseconds in the index so
//! recency sorting and tie-breaking are plain integer comparisons.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};

/// Parse a front matter date string into epoch milliseconds.
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00Z`) or a plain `YYYY-MM-DD`
/// (interpreted as midnight UTC).
pub fn parse_epoch_ms(s: &str) -> Result<i64> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc).timestamp_millis());
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .context("date out of representable range")?;
        return Ok(midnight.and_utc().timestamp_millis());
    }

    bail!("unrecognized date `{s}` (expected YYYY-MM-DD or RFC 3339)")
}

/// Format epoch milliseconds as `YYYY-MM-DD` for display.
pub fn format_ymd(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ms.to_string())
}
