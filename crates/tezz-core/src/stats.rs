//! Mark statistics
//!
//! One aggregation, [`compute_stats`], applied to different slices of
//! lessons: all lessons of the account for the overall figures, and each
//! module's lessons for the per-module table. Because both granularities
//! use the same function, the overall totals always equal the sum of the
//! per-module totals.
//!
//! Marks are nominally in `0..=100` but are not validated or clamped here.
//!
//! # Examples
//!
//! ```
//! use tezz_core::stats::compute_stats;
//! use tezz_core::types::Lesson;
//!
//! let lessons: Vec<Lesson> = serde_json::from_str(r#"[
//!     {"id": 1, "student_mark": 80},
//!     {"id": 2, "student_mark": null},
//!     {"id": 3, "student_mark": 60}
//! ]"#).unwrap();
//!
//! let stats = compute_stats(&lessons);
//! assert_eq!(stats.completed_count, 2);
//! assert_eq!(stats.total_count, 3);
//! assert_eq!(stats.average, 70.0);
//! assert_eq!(stats.highest_mark, 80.0);
//! ```

use crate::types::{Lesson, Module, ModuleId};
use serde::Serialize;

/// Aggregate figures over a set of lessons
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MarkStats {
    /// Mean of the present marks, 0 when none are present
    pub average: f64,
    /// Lessons carrying a mark
    pub completed_count: usize,
    /// All lessons in scope
    pub total_count: usize,
    /// Highest present mark, 0 when none are present
    pub highest_mark: f64,
}

impl MarkStats {
    /// Share of lessons carrying a mark, 0 for an empty scope
    pub fn completion_ratio(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.completed_count as f64 / self.total_count as f64
        }
    }

    /// [`completion_ratio`](Self::completion_ratio) as a rounded percentage
    pub fn completion_percent(&self) -> u32 {
        (self.completion_ratio() * 100.0).round() as u32
    }

    pub fn has_marks(&self) -> bool {
        self.completed_count > 0
    }
}

/// Aggregate marks over `lessons`
pub fn compute_stats<'a, I>(lessons: I) -> MarkStats
where
    I: IntoIterator<Item = &'a Lesson>,
{
    let mut total_count = 0;
    let mut completed_count = 0;
    let mut sum = 0.0;
    let mut highest: Option<f64> = None;

    for lesson in lessons {
        total_count += 1;
        if let Some(mark) = lesson.mark {
            completed_count += 1;
            sum += mark;
            highest = Some(highest.map_or(mark, |h| h.max(mark)));
        }
    }

    let average = if completed_count == 0 {
        0.0
    } else {
        sum / completed_count as f64
    };

    MarkStats {
        average,
        completed_count,
        total_count,
        highest_mark: highest.unwrap_or(0.0),
    }
}

/// Colour band used when displaying a mark or an average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkBand {
    High,
    Medium,
    Low,
}

impl MarkBand {
    /// `High` from 80, `Medium` from 60, `Low` below
    pub fn of(value: f64) -> Self {
        if value >= 80.0 {
            Self::High
        } else if value >= 60.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Statistics of a single module
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleStats {
    pub module_id: ModuleId,
    pub title: String,
    pub description: String,
    pub stats: MarkStats,
}

impl ModuleStats {
    pub fn for_module(module: &Module) -> Self {
        Self {
            module_id: module.id,
            title: module.title.clone(),
            description: module.description.clone(),
            stats: compute_stats(&module.lessons),
        }
    }
}

/// Overall and per-module statistics for the diary view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiaryReport {
    pub overall: MarkStats,
    pub modules: Vec<ModuleStats>,
}

impl DiaryReport {
    pub fn build(modules: &[Module]) -> Self {
        Self {
            overall: compute_stats(modules.iter().flat_map(|m| m.lessons.iter())),
            modules: modules.iter().map(ModuleStats::for_module).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{marked_lesson, module};

    fn marks(values: &[Option<f64>]) -> Vec<Lesson> {
        values
            .iter()
            .enumerate()
            .map(|(i, mark)| marked_lesson(i as u64, *mark))
            .collect()
    }

    #[test]
    fn test_stats_scenario() {
        let stats = compute_stats(&marks(&[Some(80.0), None, Some(60.0)]));
        assert_eq!(stats.completed_count, 2);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.average, 70.0);
        assert_eq!(stats.highest_mark, 80.0);
        assert_eq!(stats.completion_percent(), 67);
    }

    #[test]
    fn test_no_marks_degrades_to_zero() {
        let stats = compute_stats(&marks(&[None, None]));
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.highest_mark, 0.0);
        assert_eq!(stats.total_count, 2);
        assert!(!stats.has_marks());

        assert_eq!(compute_stats(&Vec::<Lesson>::new()), MarkStats::default());
        assert_eq!(MarkStats::default().completion_ratio(), 0.0);
    }

    #[test]
    fn test_out_of_range_marks_pass_through() {
        let stats = compute_stats(&marks(&[Some(-10.0), Some(-30.0)]));
        assert_eq!(stats.average, -20.0);
        assert_eq!(stats.highest_mark, -10.0);

        let stats = compute_stats(&marks(&[Some(150.0)]));
        assert_eq!(stats.highest_mark, 150.0);
    }

    #[test]
    fn test_mark_band() {
        assert_eq!(MarkBand::of(80.0), MarkBand::High);
        assert_eq!(MarkBand::of(79.9), MarkBand::Medium);
        assert_eq!(MarkBand::of(60.0), MarkBand::Medium);
        assert_eq!(MarkBand::of(59.0), MarkBand::Low);
    }

    #[test]
    fn test_diary_report_totals_match_modules() {
        let modules = vec![
            module(1, "Math", marks(&[Some(100.0), None])),
            module(2, "Physics", marks(&[Some(50.0), Some(70.0), None])),
            module(3, "Empty", vec![]),
        ];

        let report = DiaryReport::build(&modules);
        assert_eq!(report.modules.len(), 3);
        assert_eq!(report.overall.total_count, 5);
        assert_eq!(report.overall.completed_count, 3);
        assert_eq!(report.overall.highest_mark, 100.0);
        assert!((report.overall.average - 220.0 / 3.0).abs() < 1e-9);

        let summed: usize = report.modules.iter().map(|m| m.stats.completed_count).sum();
        assert_eq!(summed, report.overall.completed_count);
        assert_eq!(report.modules[2].stats, MarkStats::default());
    }
}
