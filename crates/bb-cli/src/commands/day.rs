//! Day view command: one day's entries, most recent first.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use chrono_tz::Tz;

use bb_core::{LogEntry, LogKind, day_entries};

use super::util;

fn describe(kind: &LogKind) -> String {
    match kind {
        LogKind::Poop { amount: Some(tag) } => format!("Diaper ({tag})"),
        LogKind::Poop { amount: None } => "Diaper".to_string(),
        LogKind::Feed {
            amount: Some(amount),
        } => format!("Feed ({amount})"),
        LogKind::Feed { amount: None } => "Feed".to_string(),
        LogKind::SleepStart => "Fell asleep".to_string(),
        LogKind::SleepEnd { .. } => "Woke up".to_string(),
        LogKind::Memo { text } => format!("Memo: {text}"),
    }
}

pub fn run<W: Write>(
    writer: &mut W,
    logs: &[LogEntry],
    date: Option<NaiveDate>,
    tz: Tz,
    json: bool,
) -> Result<()> {
    let instant = util::target_instant(date, tz);
    let entries = day_entries(logs, instant, tz);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }

    writeln!(writer, "Log for {}", util::format_day(instant, tz))?;
    if entries.is_empty() {
        writeln!(writer, "No entries recorded.")?;
        return Ok(());
    }

    for entry in &entries {
        let time = entry.created_at.with_timezone(&tz).format("%H:%M");
        writeln!(writer, "{time}  {}  [{}]", describe(&entry.kind), entry.id)?;
    }

    Ok(())
}
