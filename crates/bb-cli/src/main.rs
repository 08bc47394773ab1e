use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bb_cli::commands::{day, delete, log, sleep, summary};
use bb_cli::{Cli, Commands, Config, SleepAction, resolve_timezone};
use bb_core::Tracker;
use bb_db::Database;

/// Load config and open the tracker, ensuring the parent directory exists.
fn open_tracker(config_path: Option<&Path>) -> Result<(Tracker<Database>, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = Database::open(&config.database_path).context("failed to open database")?;
    Ok((Tracker::open(db), config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout();

    match &cli.command {
        Some(Commands::Poop { amount }) => {
            let (mut tracker, _config) = open_tracker(cli.config.as_deref())?;
            log::poop(&mut stdout, &mut tracker, amount.clone())?;
        }
        Some(Commands::Feed { amount }) => {
            let (mut tracker, _config) = open_tracker(cli.config.as_deref())?;
            log::feed(&mut stdout, &mut tracker, *amount)?;
        }
        Some(Commands::Sleep { action }) => {
            let (mut tracker, _config) = open_tracker(cli.config.as_deref())?;
            match action {
                SleepAction::Start => sleep::start(&mut stdout, &mut tracker)?,
                SleepAction::End => sleep::end(&mut stdout, &mut tracker)?,
            }
        }
        Some(Commands::Memo { text }) => {
            let (mut tracker, _config) = open_tracker(cli.config.as_deref())?;
            log::memo(&mut stdout, &mut tracker, text)?;
        }
        Some(Commands::Delete { id }) => {
            let (mut tracker, _config) = open_tracker(cli.config.as_deref())?;
            delete::entry(&mut stdout, &mut tracker, id)?;
        }
        Some(Commands::DeleteDay { date }) => {
            let (mut tracker, config) = open_tracker(cli.config.as_deref())?;
            let tz = resolve_timezone(cli.timezone.as_deref(), &config);
            delete::day(&mut stdout, &mut tracker, *date, tz)?;
        }
        Some(Commands::DeleteAll) => {
            let (mut tracker, _config) = open_tracker(cli.config.as_deref())?;
            delete::all(&mut stdout, &mut tracker)?;
        }
        Some(Commands::Summary { date, json }) => {
            let (tracker, config) = open_tracker(cli.config.as_deref())?;
            let tz = resolve_timezone(cli.timezone.as_deref(), &config);
            summary::run(&mut stdout, tracker.book().entries(), *date, tz, *json)?;
        }
        Some(Commands::Day { date, json }) => {
            let (tracker, config) = open_tracker(cli.config.as_deref())?;
            let tz = resolve_timezone(cli.timezone.as_deref(), &config);
            day::run(&mut stdout, tracker.book().entries(), *date, tz, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
