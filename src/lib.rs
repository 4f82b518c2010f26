//! tezz - terminal client for the TEZZ education dashboard
//!
//! This library provides functionality to:
//! - Fetch modules, lessons, marks and the profile from the TEZZ backend
//! - Lay lessons out on day, week and month calendars in any timezone
//! - Compute mark statistics per module and overall
//! - Render everything as terminal tables or JSON
//!
//! # Examples
//!
//! ```no_run
//! use tezz::{ApiClient, ApiConfig, ModuleSource, ScheduleView, Granularity};
//! use tezz::timezone::TimezoneConfig;
//! use chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() -> tezz::Result<()> {
//!     let config = ApiConfig::from_cli(None, None)?;
//!     let client = ApiClient::new(&config)?.with_token("access-token");
//!
//!     let tz = TimezoneConfig::default();
//!     let now = Utc::now();
//!     let modules = client.fetch_modules().await?;
//!     let view = ScheduleView::build(&modules, tz.today(&now), Granularity::Week, &tz.tz, now)?;
//!     println!("{} lessons this week", view.visible_count());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;

// Re-export the workspace crates under their familiar module names
pub use tezz_core::{account, calendar, error, grouping, schedule, stats, status, timezone, types};
pub use tezz_terminal::output;

// Re-export commonly used types
pub use tezz_api::{ApiClient, ApiConfig, ModuleSource, SessionStore, StoredSession};
pub use tezz_core::{
    AnnotatedLesson, DayBucket, DiaryReport, Granularity, Lesson, LessonId, LessonStatus,
    MarkStats, Module, ModuleId, Result, ScheduleView, TezzError, ViewWindow, classify,
    compute_stats, flatten_lessons, group_by_day,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
