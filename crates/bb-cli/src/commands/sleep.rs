//! Sleep start/end commands.

use std::io::Write;

use anyhow::Result;

use bb_core::{Repository, Tracker};

pub fn start<W: Write, R: Repository>(writer: &mut W, tracker: &mut Tracker<R>) -> Result<()> {
    match tracker.start_sleep() {
        Some(id) => writeln!(writer, "Sleep started ({id}).")?,
        None => writeln!(writer, "Already sleeping; nothing recorded.")?,
    }
    Ok(())
}

pub fn end<W: Write, R: Repository>(writer: &mut W, tracker: &mut Tracker<R>) -> Result<()> {
    match tracker.end_sleep() {
        Some(id) => writeln!(writer, "Woke up ({id}).")?,
        None => writeln!(writer, "No open sleep; nothing recorded.")?,
    }
    Ok(())
}
