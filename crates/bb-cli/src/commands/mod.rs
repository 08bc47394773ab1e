//! CLI subcommand implementations.

pub mod day;
pub mod delete;
pub mod log;
pub mod sleep;
pub mod summary;
pub mod util;
