//! Core types, traits, and utilities for tezz
//!
//! This crate holds the pure side of the dashboard: the module/lesson
//! domain model, the calendar window calculator, lesson grouping by day,
//! mark statistics and lesson status classification. Nothing in here
//! touches the network or a clock; "now" and the timezone are always
//! passed in by the caller.

pub mod account;
pub mod calendar;
pub mod error;
pub mod grouping;
pub mod schedule;
pub mod stats;
pub mod status;
pub mod timezone;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use account::{LessonPage, Participants, Profile, ProfileUpdate, Role, TokenPair};
pub use calendar::{Direction, Granularity, ViewWindow};
pub use error::{Result, TezzError};
pub use grouping::{DayBucket, flatten_lessons, group_by_day};
pub use schedule::ScheduleView;
pub use stats::{DiaryReport, MarkBand, MarkStats, ModuleStats, compute_stats};
pub use status::{LessonStatus, ScheduleSummary, classify};
pub use types::{AnnotatedLesson, Lesson, LessonId, Module, ModuleId};
