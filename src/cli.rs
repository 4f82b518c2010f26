//! CLI interface for tezz
//!
//! This module defines the command-line interface using clap. Every command
//! except `login` and `logout` replays the session stored by `tezz login`.
//!
//! # Example
//!
//! ```bash
//! # Log in once, the token is stored under the config directory
//! tezz login --username aibek
//!
//! # This week's lessons, then the week after
//! tezz schedule
//! tezz schedule --shift 1
//!
//! # Statistics per module as JSON
//! tezz diary --json
//!
//! # Save two scores at once (teachers)
//! tezz grade 40=85 41=60
//! ```

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tezz_api::client::validate_score;
use tezz_core::account::ProfileUpdate;
use tezz_core::calendar::Granularity;
use tezz_core::error::{Result, TezzError};

/// Terminal client for the TEZZ education dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "tezz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Timezone for calendar days (e.g. "Asia/Bishkek", "Europe/Moscow", "UTC")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Use UTC for calendar days (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// API root, defaults to the session's or https://tezz.kg/api/
    #[arg(long, global = true, env = "TEZZ_API_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in and store the session
    Login {
        /// Account username
        #[arg(long, short = 'u')]
        username: String,

        /// Account password
        #[arg(long, env = "TEZZ_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show or edit the current user's profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },

    /// List modules with their progress
    Modules,

    /// Show one module and its lessons
    Module {
        /// Module ID
        id: u64,
    },

    /// Show a lesson with its marks or class roster
    Lesson {
        /// Lesson ID
        id: u64,
    },

    /// Show lessons for a day, week or month
    Schedule(ScheduleArgs),

    /// Show average, highest mark and completion per module
    Diary,

    /// Save scores for several mark records (teachers)
    Grade {
        /// Assignments of the form MARK_ID=SCORE
        #[arg(required = true, value_parser = parse_score_assignment)]
        scores: Vec<(u64, u8)>,
    },

    /// Upload an answer file for a mark record (students)
    Submit {
        /// Mark record ID
        #[arg(long)]
        mark: u64,

        /// File to upload
        #[arg(long)]
        file: PathBuf,
    },
}

/// Profile subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProfileAction {
    /// Change profile fields; only the given ones are sent
    Update(ProfileArgs),
}

/// Editable profile fields
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub telegram: Option<String>,

    #[arg(long)]
    pub discord: Option<String>,
}

impl From<ProfileArgs> for ProfileUpdate {
    fn from(args: ProfileArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            telegram: args.telegram,
            discord: args.discord,
        }
    }
}

/// Arguments for the schedule view
#[derive(Args, Debug, Clone)]
pub struct ScheduleArgs {
    /// View granularity: day, week or month
    #[arg(long, default_value = "week")]
    pub view: Granularity,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Move the view this many days, weeks or months (negative goes back)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub shift: i32,
}

/// Parse a date argument in YYYY-MM-DD format
///
/// # Example
///
/// ```
/// use tezz::cli::parse_date;
/// use chrono::Datelike;
///
/// let date = parse_date("2024-03-13").unwrap();
/// assert_eq!(date.day(), 13);
/// ```
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
        TezzError::InvalidDate(format!(
            "Invalid date format: {date_str}. Use YYYY-MM-DD"
        ))
    })
}

/// Parse a `MARK_ID=SCORE` assignment
pub fn parse_score_assignment(raw: &str) -> Result<(u64, u8)> {
    let (id, score) = raw.split_once('=').ok_or_else(|| {
        TezzError::InvalidArgument(format!("expected MARK_ID=SCORE, got '{raw}'"))
    })?;

    let id = id
        .trim()
        .parse::<u64>()
        .map_err(|_| TezzError::InvalidArgument(format!("invalid mark id in '{raw}'")))?;
    let score = score
        .trim()
        .parse::<u8>()
        .map_err(|_| TezzError::InvalidArgument(format!("invalid score in '{raw}'")))?;

    Ok((id, validate_score(score)?))
}
