//! Commands that append log entries: poop, feed, and memo.

use std::io::Write;

use anyhow::{Result, bail};

use bb_core::{FeedAmount, Repository, Tracker};

/// Maximum words allowed in a memo. Enforced here at the edge; the store
/// accepts any text.
const MEMO_WORD_LIMIT: usize = 100;

pub fn poop<W: Write, R: Repository>(
    writer: &mut W,
    tracker: &mut Tracker<R>,
    amount: Option<String>,
) -> Result<()> {
    let id = tracker.add_poop(amount);
    writeln!(writer, "Logged diaper change ({id}).")?;
    Ok(())
}

pub fn feed<W: Write, R: Repository>(
    writer: &mut W,
    tracker: &mut Tracker<R>,
    amount: Option<FeedAmount>,
) -> Result<()> {
    let id = tracker.add_feed(amount);
    match amount {
        Some(amount) => writeln!(writer, "Logged feeding, {amount} ({id}).")?,
        None => writeln!(writer, "Logged feeding ({id}).")?,
    }
    Ok(())
}

pub fn memo<W: Write, R: Repository>(
    writer: &mut W,
    tracker: &mut Tracker<R>,
    text: &str,
) -> Result<()> {
    let words = text.split_whitespace().count();
    if words > MEMO_WORD_LIMIT {
        bail!("memo is {words} words; the limit is {MEMO_WORD_LIMIT}");
    }

    let id = tracker.add_memo(text);
    writeln!(writer, "Saved memo ({id}).")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use bb_core::{LogKind, MemoryRepository};

    use super::*;

    fn tracker() -> Tracker<MemoryRepository> {
        Tracker::open(MemoryRepository::new())
    }

    #[test]
    fn poop_appends_and_reports_the_id() {
        let mut tracker = tracker();
        let mut output = Vec::new();
        poop(&mut output, &mut tracker, Some("light".to_string())).unwrap();

        let entries = tracker.book().entries();
        assert_eq!(entries.len(), 1);
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains(entries[0].id.as_str()));
    }

    #[test]
    fn feed_mentions_the_amount() {
        let mut tracker = tracker();
        let mut output = Vec::new();
        feed(&mut output, &mut tracker, Some(FeedAmount::Barely)).unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("barely"));
    }

    #[test]
    fn memo_stores_text_verbatim() {
        let mut tracker = tracker();
        let mut output = Vec::new();
        memo(&mut output, &mut tracker, "  spaced   out  ").unwrap();

        assert_eq!(
            tracker.book().entries()[0].kind,
            LogKind::Memo {
                text: "  spaced   out  ".to_string()
            }
        );
    }

    #[test]
    fn memo_over_the_word_limit_is_rejected() {
        let mut tracker = tracker();
        let mut output = Vec::new();
        let long = ["word"; 101].join(" ");

        let result = memo(&mut output, &mut tracker, &long);
        assert!(result.is_err());
        assert!(tracker.book().entries().is_empty(), "store must be untouched");
    }

    #[test]
    fn memo_at_the_word_limit_is_accepted() {
        let mut tracker = tracker();
        let mut output = Vec::new();
        let exact = ["word"; 100].join(" ");

        memo(&mut output, &mut tracker, &exact).unwrap();
        assert_eq!(tracker.book().entries().len(), 1);
    }
}
