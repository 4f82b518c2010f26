//! Lesson grouping engine
//!
//! Flattens modules into one start-ordered list of scheduled lessons and
//! buckets that list by calendar day in a given timezone.

use crate::timezone::local_date;
use crate::types::{AnnotatedLesson, Module};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::BTreeMap;

/// Lessons starting on one calendar date, ordered by start time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub lessons: Vec<AnnotatedLesson>,
}

impl DayBucket {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            lessons: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

/// Every lesson with both timestamps, annotated with its module
///
/// Sorted ascending by start time. The sort is stable, so lessons starting
/// at the same instant keep module order, then lesson order.
pub fn flatten_lessons(modules: &[Module]) -> Vec<AnnotatedLesson> {
    let mut lessons: Vec<AnnotatedLesson> = modules
        .iter()
        .flat_map(|module| {
            module
                .lessons
                .iter()
                .filter_map(move |lesson| AnnotatedLesson::new(lesson, module))
        })
        .collect();

    lessons.sort_by_key(|lesson| lesson.start);
    lessons
}

/// Bucket lessons by the local calendar date of their start
///
/// A lesson running past midnight stays on the day it started. Input order
/// is kept inside each bucket, so feeding the output of [`flatten_lessons`]
/// yields start-ordered buckets.
pub fn group_by_day(lessons: &[AnnotatedLesson], tz: &Tz) -> BTreeMap<NaiveDate, DayBucket> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for lesson in lessons {
        let date = local_date(&lesson.start, tz);
        buckets
            .entry(date)
            .or_insert_with(|| DayBucket::empty(date))
            .lessons
            .push(lesson.clone());
    }

    buckets
}

/// Buckets for exactly the given days, empty where nothing is scheduled
pub fn buckets_for_days(
    grouped: &BTreeMap<NaiveDate, DayBucket>,
    days: &[NaiveDate],
) -> Vec<DayBucket> {
    days.iter()
        .map(|day| {
            grouped
                .get(day)
                .cloned()
                .unwrap_or_else(|| DayBucket::empty(*day))
        })
        .collect()
}
