//! Daily summary command.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use bb_core::{LogEntry, daily_summary, format_duration};

use super::util;

/// JSON output structure.
#[derive(Debug, Serialize)]
struct JsonSummary {
    date: String,
    timezone: String,
    poops: u32,
    feeds: u32,
    sleep_ms: i64,
    sleep: String,
}

pub fn run<W: Write>(
    writer: &mut W,
    logs: &[LogEntry],
    date: Option<NaiveDate>,
    tz: Tz,
    json: bool,
) -> Result<()> {
    let instant = util::target_instant(date, tz);
    let summary = daily_summary(logs, instant, tz);

    if json {
        let output = JsonSummary {
            date: instant.with_timezone(&tz).date_naive().to_string(),
            timezone: tz.name().to_string(),
            poops: summary.poops,
            feeds: summary.feeds,
            sleep_ms: summary.sleep_ms,
            sleep: format_duration(summary.sleep_ms),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(writer, "Daily summary: {}", util::format_day(instant, tz))?;
        writeln!(writer, "Diapers:  {}", summary.poops)?;
        writeln!(writer, "Feedings: {}", summary.feeds)?;
        writeln!(writer, "Sleep:    {}", format_duration(summary.sleep_ms))?;
    }

    Ok(())
}
