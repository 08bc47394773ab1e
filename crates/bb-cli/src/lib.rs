//! Baby care tracker CLI library.
//!
//! This crate provides the command-line interface over the core log book.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, SleepAction};
pub use config::{Config, resolve_timezone};
