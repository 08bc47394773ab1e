//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use bb_core::FeedAmount;

/// Baby care activity tracker.
///
/// Logs diaper changes, feedings, sleep and memos, and shows per-day
/// summaries computed in your local timezone.
#[derive(Debug, Parser)]
#[command(name = "bb", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// IANA timezone for day boundaries (default: the system timezone).
    #[arg(short, long, global = true)]
    pub timezone: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a diaper change.
    Poop {
        /// Free-form severity tag (e.g. "light", "heavy").
        #[arg(long)]
        amount: Option<String>,
    },

    /// Record a feeding.
    Feed {
        /// How much was drunk: a-lot, normal, or barely.
        #[arg(long)]
        amount: Option<FeedAmount>,
    },

    /// Record the baby falling asleep or waking up.
    Sleep {
        #[command(subcommand)]
        action: SleepAction,
    },

    /// Record a free-text memo (at most 100 words).
    Memo {
        /// The memo text.
        text: String,
    },

    /// Delete one log entry by id.
    Delete {
        /// The id of the entry to delete.
        id: String,
    },

    /// Delete every entry on one calendar day.
    DeleteDay {
        /// The day to clear, as YYYY-MM-DD (default: today).
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Delete all entries and close any open sleep.
    DeleteAll,

    /// Show the daily summary: diapers, feedings, and total sleep.
    Summary {
        /// The day to summarize, as YYYY-MM-DD (default: today).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List one day's entries, most recent first.
    Day {
        /// The day to list, as YYYY-MM-DD (default: today).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Sleep interval boundaries.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum SleepAction {
    /// Open a sleep interval; does nothing if one is already open.
    Start,
    /// Close the open sleep interval; does nothing if none is open.
    End,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_feed_amount() {
        let cli = Cli::parse_from(["bb", "feed", "--amount", "a-lot"]);
        match cli.command {
            Some(Commands::Feed { amount }) => assert_eq!(amount, Some(FeedAmount::ALot)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_feed_amount() {
        let result = Cli::try_parse_from(["bb", "feed", "--amount", "gallons"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_summary_date() {
        let cli = Cli::parse_from(["bb", "summary", "--date", "2025-03-01", "--json"]);
        match cli.command {
            Some(Commands::Summary { date, json }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 1));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
