//! Terminal output formatting for tezz
//!
//! This crate provides table and JSON output formatters for schedules,
//! diaries, modules, lessons and profiles.

pub mod output;

pub use output::{JsonFormatter, OutputFormatter, TableFormatter, get_formatter};
