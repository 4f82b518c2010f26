//! Schedule view model
//!
//! Composes the window calculator, the grouping engine and the status
//! classifier into the data one schedule screen needs.

use crate::calendar::{Granularity, ViewWindow};
use crate::error::Result;
use crate::grouping::{DayBucket, buckets_for_days, flatten_lessons, group_by_day};
use crate::status::ScheduleSummary;
use crate::types::Module;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Everything needed to render one schedule screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleView {
    pub reference: NaiveDate,
    pub window: ViewWindow,
    /// One bucket per displayed day, empty days included
    pub days: Vec<DayBucket>,
    /// Counts over all scheduled lessons, not just the displayed window
    pub summary: ScheduleSummary,
    pub today: NaiveDate,
    #[serde(skip)]
    pub now: DateTime<Utc>,
}

impl ScheduleView {
    pub fn build(
        modules: &[Module],
        reference: NaiveDate,
        granularity: Granularity,
        tz: &Tz,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let lessons = flatten_lessons(modules);
        let grouped = group_by_day(&lessons, tz);
        let window = ViewWindow::new(reference, granularity)?;
        let days = buckets_for_days(&grouped, window.days());

        Ok(Self {
            reference,
            days,
            window,
            summary: ScheduleSummary::from_lessons(&lessons, now),
            today: crate::timezone::local_date(&now, tz),
            now,
        })
    }

    pub fn granularity(&self) -> Granularity {
        self.window.granularity()
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }

    /// Lessons visible in the window
    pub fn visible_count(&self) -> usize {
        self.days.iter().map(DayBucket::len).sum()
    }
}
