//! Deletion commands: single entry, whole day, everything.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use chrono_tz::Tz;

use bb_core::{LogId, Repository, Tracker};

use super::util;

pub fn entry<W: Write, R: Repository>(
    writer: &mut W,
    tracker: &mut Tracker<R>,
    id: &str,
) -> Result<()> {
    // A malformed or unknown id is a report, not an error.
    let removed = LogId::new(id).is_ok_and(|id| tracker.delete(&id));
    if removed {
        writeln!(writer, "Deleted {id}.")?;
    } else {
        writeln!(writer, "No entry with id {id}.")?;
    }
    Ok(())
}

pub fn day<W: Write, R: Repository>(
    writer: &mut W,
    tracker: &mut Tracker<R>,
    date: Option<NaiveDate>,
    tz: Tz,
) -> Result<()> {
    let instant = util::target_instant(date, tz);
    let removed = tracker.delete_day(instant, tz);
    writeln!(
        writer,
        "Deleted {removed} entries on {}.",
        util::format_day(instant, tz)
    )?;
    Ok(())
}

pub fn all<W: Write, R: Repository>(writer: &mut W, tracker: &mut Tracker<R>) -> Result<()> {
    tracker.delete_all();
    writeln!(writer, "Deleted all entries.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use bb_core::MemoryRepository;

    use super::*;

    fn tracker() -> Tracker<MemoryRepository> {
        Tracker::open(MemoryRepository::new())
    }

    #[test]
    fn deletes_one_entry_by_id() {
        let mut tracker = tracker();
        let id = tracker.add_poop(None);
        tracker.add_feed(None);

        let mut output = Vec::new();
        entry(&mut output, &mut tracker, id.as_str()).unwrap();

        assert_eq!(tracker.book().entries().len(), 1);
        assert!(String::from_utf8(output).unwrap().starts_with("Deleted"));
    }

    #[test]
    fn unknown_id_is_reported_not_fatal() {
        let mut tracker = tracker();
        let mut output = Vec::new();

        entry(&mut output, &mut tracker, "nope").unwrap();
        entry(&mut output, &mut tracker, "").unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("No entry").count(), 2);
    }

    #[test]
    fn delete_all_resets_the_tracker() {
        let mut tracker = tracker();
        tracker.add_poop(None);
        tracker.start_sleep();

        let mut output = Vec::new();
        all(&mut output, &mut tracker).unwrap();

        assert!(tracker.book().entries().is_empty());
        assert!(!tracker.book().is_sleeping());
    }

    #[test]
    fn delete_day_reports_the_count() {
        let mut tracker = tracker();
        tracker.add_poop(None);
        tracker.add_feed(None);

        let mut output = Vec::new();
        day(&mut output, &mut tracker, None, Tz::UTC).unwrap();

        assert!(tracker.book().entries().is_empty());
        assert!(
            String::from_utf8(output)
                .unwrap()
                .starts_with("Deleted 2 entries")
        );
    }
}
