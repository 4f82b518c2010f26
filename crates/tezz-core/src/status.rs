//! Lesson status classifier
//!
//! Pure function of "now" and a lesson's time slot. The caller supplies
//! "now"; nothing here reads a clock.

use crate::types::AnnotatedLesson;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Where a scheduled lesson stands relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    Upcoming,
    Ongoing,
    Passed,
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Ongoing => write!(f, "ongoing"),
            Self::Passed => write!(f, "passed"),
        }
    }
}

/// Classify a `[start, end]` slot against `now`
///
/// Both bounds are inclusive for `Ongoing`.
///
/// # Examples
/// ```
/// use tezz_core::status::{classify, LessonStatus};
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap();
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0).unwrap();
///
/// assert_eq!(classify(now, start, end), LessonStatus::Ongoing);
/// ```
pub fn classify(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> LessonStatus {
    if end < now {
        LessonStatus::Passed
    } else if start <= now {
        LessonStatus::Ongoing
    } else {
        LessonStatus::Upcoming
    }
}

impl AnnotatedLesson {
    pub fn status(&self, now: DateTime<Utc>) -> LessonStatus {
        classify(now, self.start, self.end)
    }
}

/// Counts of scheduled lessons per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub total: usize,
    pub upcoming: usize,
    pub ongoing: usize,
    pub passed: usize,
}

impl ScheduleSummary {
    pub fn from_lessons(lessons: &[AnnotatedLesson], now: DateTime<Utc>) -> Self {
        lessons
            .iter()
            .fold(Self::default(), |mut summary, lesson| {
                summary.total += 1;
                match lesson.status(now) {
                    LessonStatus::Upcoming => summary.upcoming += 1,
                    LessonStatus::Ongoing => summary.ongoing += 1,
                    LessonStatus::Passed => summary.passed += 1,
                }
                summary
            })
    }
}
