//! Output formatting module for tezz
//!
//! This module provides formatters for displaying dashboard data in different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```no_run
//! use tezz_terminal::output::get_formatter;
//! use tezz_core::{Granularity, ScheduleView};
//! use chrono::{NaiveDate, Utc};
//!
//! let view = ScheduleView::build(
//!     &[],
//!     NaiveDate::from_ymd_opt(2024, 3, 13).unwrap(),
//!     Granularity::Week,
//!     &chrono_tz::UTC,
//!     Utc::now(),
//! )
//! .unwrap();
//!
//! // Get table formatter for human-readable output
//! let formatter = get_formatter(false);
//! println!("{}", formatter.format_schedule(&view, &chrono_tz::UTC));
//!
//! // Get JSON formatter for machine-readable output
//! let json_formatter = get_formatter(true);
//! println!("{}", json_formatter.format_schedule(&view, &chrono_tz::UTC));
//! ```

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use colored::Colorize;
use prettytable::{Cell, Row, Table, format, row};
use serde_json::{Value, json};
use tezz_core::account::{LessonPage, Participants, Profile};
use tezz_core::calendar::ViewWindow;
use tezz_core::schedule::ScheduleView;
use tezz_core::stats::{DiaryReport, MarkBand, MarkStats, compute_stats};
use tezz_core::status::LessonStatus;
use tezz_core::types::{AnnotatedLesson, Lesson, Module};

/// Placeholder shown for a missing mark or time
const MISSING: &str = "—";

/// Trait for output formatters
///
/// Implementations render the dashboard's screens; the table formatter for
/// people, the JSON formatter for scripts.
pub trait OutputFormatter {
    /// Format a day/week/month schedule
    fn format_schedule(&self, view: &ScheduleView, tz: &Tz) -> String;

    /// Format the diary: overall and per-module statistics with lesson marks
    fn format_diary(&self, report: &DiaryReport, modules: &[Module], tz: &Tz) -> String;

    /// Format the list of modules
    fn format_modules(&self, modules: &[Module]) -> String;

    /// Format a single module with its lessons
    fn format_module(&self, module: &Module, tz: &Tz) -> String;

    /// Format the lesson screen
    fn format_lesson_page(&self, page: &LessonPage, tz: &Tz) -> String;

    /// Format the current user's profile
    fn format_profile(&self, profile: &Profile) -> String;
}

/// Table formatter for human-readable output
///
/// Marks and averages are coloured by [`MarkBand`] and today's heading is
/// highlighted when colours are enabled.
pub struct TableFormatter {
    /// Whether to use colored output (respects NO_COLOR environment variable)
    pub colored_output: bool,
}

impl TableFormatter {
    pub fn new(colored_output: bool) -> Self {
        Self { colored_output }
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table
    }

    /// Render a mark without trailing zeros, or a dash when absent
    fn format_mark(mark: Option<f64>) -> String {
        match mark {
            None => MISSING.to_string(),
            Some(m) if m.fract() == 0.0 => format!("{m:.0}"),
            Some(m) => format!("{m:.1}"),
        }
    }

    fn format_time(dt: &DateTime<Utc>, tz: &Tz) -> String {
        dt.with_timezone(tz).format("%H:%M").to_string()
    }

    fn format_datetime(dt: Option<&DateTime<Utc>>, tz: &Tz) -> String {
        dt.map(|dt| dt.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| MISSING.to_string())
    }

    fn band_style(band: MarkBand) -> &'static str {
        match band {
            MarkBand::High => "Fg",
            MarkBand::Medium => "Fy",
            MarkBand::Low => "Fr",
        }
    }

    fn styled(&self, text: String, spec: &str) -> Cell {
        let cell = Cell::new(&text);
        if self.colored_output {
            cell.style_spec(spec)
        } else {
            cell
        }
    }

    fn mark_cell(&self, mark: Option<f64>) -> Cell {
        match mark {
            Some(m) => self.styled(Self::format_mark(mark), Self::band_style(MarkBand::of(m))),
            None => Cell::new(MISSING).style_spec("c"),
        }
    }

    fn average_cell(&self, stats: &MarkStats) -> Cell {
        if stats.has_marks() {
            self.styled(
                format!("{:.1}", stats.average),
                Self::band_style(MarkBand::of(stats.average)),
            )
        } else {
            Cell::new(MISSING).style_spec("c")
        }
    }

    fn status_cell(&self, status: LessonStatus) -> Cell {
        let spec = match status {
            LessonStatus::Upcoming => "Fb",
            LessonStatus::Ongoing => "bFg",
            LessonStatus::Passed => "",
        };
        self.styled(status.to_string(), spec)
    }

    fn heading(&self, text: &str) -> String {
        if self.colored_output {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn stats_row(&self, label: &str, stats: &MarkStats) -> Row {
        Row::new(vec![
            Cell::new(label),
            self.average_cell(stats),
            if stats.has_marks() {
                self.mark_cell(Some(stats.highest_mark))
            } else {
                Cell::new(MISSING).style_spec("c")
            },
            Cell::new(&format!("{}/{}", stats.completed_count, stats.total_count)).style_spec("r"),
            Cell::new(&format!("{}%", stats.completion_percent())).style_spec("r"),
        ])
    }

    fn day_table(&self, lessons: &[AnnotatedLesson], now: DateTime<Utc>, tz: &Tz) -> Table {
        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "Time",
            b -> "Lesson",
            b -> "Module",
            b -> "Status",
            b -> "Mark"
        ]);

        for lesson in lessons {
            table.add_row(Row::new(vec![
                Cell::new(&format!(
                    "{}-{}",
                    Self::format_time(&lesson.start, tz),
                    Self::format_time(&lesson.end, tz)
                )),
                Cell::new(lesson.title()),
                Cell::new(&lesson.module_title),
                self.status_cell(lesson.status(now)),
                self.mark_cell(lesson.lesson.mark),
            ]));
        }

        table
    }

    fn lesson_table(&self, lessons: &[Lesson], tz: &Tz) -> Table {
        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "ID",
            b -> "Lesson",
            b -> "Start",
            b -> "End",
            b -> "Mark"
        ]);

        for lesson in lessons {
            table.add_row(Row::new(vec![
                Cell::new(&lesson.id.to_string()).style_spec("r"),
                Cell::new(&lesson.title),
                Cell::new(&Self::format_datetime(lesson.start_time.as_ref(), tz)),
                Cell::new(&Self::format_datetime(lesson.end_time.as_ref(), tz)),
                self.mark_cell(lesson.mark),
            ]));
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new(std::env::var("NO_COLOR").is_err())
    }
}

impl OutputFormatter for TableFormatter {
    fn format_schedule(&self, view: &ScheduleView, tz: &Tz) -> String {
        let mut output = String::new();

        match &view.window {
            ViewWindow::Month { year, month } => {
                output.push_str(&self.heading(&format!("{year}-{month:02}")));
                output.push('\n');
                output.push_str(
                    "The month view has no day grid; use --view week or --view day to list lessons\n",
                );
            }
            _ => {
                for bucket in &view.days {
                    let mut title = self.heading(&bucket.date.format("%a %Y-%m-%d").to_string());
                    if view.is_today(bucket.date) {
                        let marker = if self.colored_output {
                            " (today)".green().bold().to_string()
                        } else {
                            " (today)".to_string()
                        };
                        title.push_str(&marker);
                    }
                    output.push_str(&format!("\n{title}\n"));

                    if bucket.is_empty() {
                        output.push_str("  No lessons\n");
                    } else {
                        output.push_str(&self.day_table(&bucket.lessons, view.now, tz).to_string());
                    }
                }
            }
        }

        let summary = &view.summary;
        output.push_str(&format!(
            "\nTotal: {}  Upcoming: {}  Ongoing: {}  Passed: {}\n",
            summary.total, summary.upcoming, summary.ongoing, summary.passed
        ));
        output
    }

    fn format_diary(&self, report: &DiaryReport, modules: &[Module], tz: &Tz) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "Module",
            b -> "Average",
            b -> "Highest",
            b -> "Marked",
            b -> "Progress"
        ]);

        for module in &report.modules {
            table.add_row(self.stats_row(&module.title, &module.stats));
        }

        // Add separator
        table.add_row(Row::new(vec![Cell::new(""); 5]));

        let mut totals = self.stats_row("OVERALL", &report.overall);
        if let Some(cell) = totals.get_mut_cell(0) {
            cell.style(prettytable::Attr::Bold);
        }
        table.add_row(totals);

        let mut output = table.to_string();

        for module in modules.iter().filter(|m| !m.lessons.is_empty()) {
            output.push_str(&format!("\n{}\n", self.heading(&module.title)));

            let mut lessons = Self::new_table();
            lessons.set_titles(row![b -> "Lesson", b -> "Date", b -> "Mark"]);
            for lesson in &module.lessons {
                lessons.add_row(Row::new(vec![
                    Cell::new(&lesson.title),
                    Cell::new(&Self::format_datetime(lesson.start_time.as_ref(), tz)),
                    self.mark_cell(lesson.mark),
                ]));
            }
            output.push_str(&lessons.to_string());
        }

        output
    }

    fn format_modules(&self, modules: &[Module]) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "ID",
            b -> "Title",
            b -> "Lessons",
            b -> "Marked",
            b -> "Average"
        ]);

        for module in modules {
            let stats = compute_stats(&module.lessons);
            table.add_row(Row::new(vec![
                Cell::new(&module.id.to_string()).style_spec("r"),
                Cell::new(&module.title),
                Cell::new(&module.lessons.len().to_string()).style_spec("r"),
                Cell::new(&format!("{}/{}", stats.completed_count, stats.total_count))
                    .style_spec("r"),
                self.average_cell(&stats),
            ]));
        }

        table.to_string()
    }

    fn format_module(&self, module: &Module, tz: &Tz) -> String {
        let mut output = format!("{}\n", self.heading(&module.title));
        if !module.description.is_empty() {
            output.push_str(&format!("{}\n", module.description));
        }

        if module.lessons.is_empty() {
            output.push_str("\nNo lessons yet\n");
            return output;
        }

        output.push('\n');
        output.push_str(&self.lesson_table(&module.lessons, tz).to_string());

        let stats = compute_stats(&module.lessons);
        output.push_str(&format!(
            "\nAverage: {}  Highest: {}  Progress: {}%\n",
            if stats.has_marks() {
                format!("{:.1}", stats.average)
            } else {
                MISSING.to_string()
            },
            if stats.has_marks() {
                Self::format_mark(Some(stats.highest_mark))
            } else {
                MISSING.to_string()
            },
            stats.completion_percent()
        ));
        output
    }

    fn format_lesson_page(&self, page: &LessonPage, tz: &Tz) -> String {
        let lesson = &page.lesson;
        let mut output = format!("{}\n", self.heading(&lesson.title));

        if let (Some(start), Some(end)) = (&lesson.start_time, &lesson.end_time) {
            output.push_str(&format!(
                "When: {}-{}\n",
                Self::format_datetime(Some(start), tz),
                Self::format_time(end, tz)
            ));
        }
        if let Some(mark) = lesson.mark {
            output.push_str(&format!("Mark: {}\n", Self::format_mark(Some(mark))));
        }
        if let Some(content) = lesson.content.as_deref().filter(|c| !c.trim().is_empty()) {
            output.push_str(&format!("\n{}\n", content.trim()));
        }

        match &page.participants {
            Participants::Roster(rows) => {
                output.push_str(&format!("\n{}\n", self.heading("Students")));
                if rows.is_empty() {
                    output.push_str("No students enrolled\n");
                    return output;
                }

                let mut table = Self::new_table();
                table.set_titles(row![
                    b -> "Mark ID",
                    b -> "Student",
                    b -> "Username",
                    b -> "Mark",
                    b -> "Answer"
                ]);
                for row in rows {
                    table.add_row(Row::new(vec![
                        Cell::new(&row.mark_id.map_or_else(|| MISSING.to_string(), |id| id.to_string()))
                            .style_spec("r"),
                        Cell::new(&row.student.display_name()),
                        Cell::new(&row.student.username),
                        self.mark_cell(row.mark.map(f64::from)),
                        Cell::new(row.answer_url.as_deref().unwrap_or(MISSING)),
                    ]));
                }
                output.push_str(&table.to_string());
            }
            Participants::Marks(rows) => {
                output.push_str(&format!("\n{}\n", self.heading("Marks")));
                if rows.is_empty() {
                    output.push_str("No marks yet\n");
                    return output;
                }

                let mut table = Self::new_table();
                table.set_titles(row![
                    b -> "Mark ID",
                    b -> "Score",
                    b -> "Answer",
                    b -> "Updated"
                ]);
                for row in rows {
                    table.add_row(Row::new(vec![
                        Cell::new(&row.id.to_string()).style_spec("r"),
                        self.mark_cell(row.score.map(f64::from)),
                        Cell::new(row.answer.as_deref().unwrap_or(MISSING)),
                        Cell::new(row.updated_at.as_deref().unwrap_or(MISSING)),
                    ]));
                }
                output.push_str(&table.to_string());
            }
        }

        output
    }

    fn format_profile(&self, profile: &Profile) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);

        let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| MISSING.to_string());
        table.add_row(row![b -> "Name", profile.display_name()]);
        table.add_row(row![b -> "Username", profile.username]);
        table.add_row(row![b -> "Email", profile.email]);
        table.add_row(row![b -> "Role", profile.role]);
        table.add_row(row![b -> "Telegram", optional(&profile.telegram)]);
        table.add_row(row![b -> "Discord", optional(&profile.discord)]);

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
///
/// Lessons carry their computed status and every statistics block carries
/// its completion percentage, so scripts do not have to recompute them.
pub struct JsonFormatter;

impl JsonFormatter {
    fn stats_json(stats: &MarkStats) -> Value {
        json!({
            "average": stats.average,
            "highest_mark": stats.highest_mark,
            "completed_count": stats.completed_count,
            "total_count": stats.total_count,
            "completion_percent": stats.completion_percent(),
        })
    }

    fn lesson_json(lesson: &Lesson) -> Value {
        json!({
            "id": lesson.id,
            "title": lesson.title,
            "start_time": lesson.start_time.map(|t| t.to_rfc3339()),
            "end_time": lesson.end_time.map(|t| t.to_rfc3339()),
            "mark": lesson.mark,
        })
    }

    fn pretty(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_schedule(&self, view: &ScheduleView, _tz: &Tz) -> String {
        let output = json!({
            "reference": view.reference.to_string(),
            "granularity": view.granularity().to_string(),
            "today": view.today.to_string(),
            "window": view.window,
            "days": view.days.iter().map(|bucket| json!({
                "date": bucket.date.to_string(),
                "is_today": view.is_today(bucket.date),
                "lessons": bucket.lessons.iter().map(|l| json!({
                    "id": l.id(),
                    "title": l.title(),
                    "module_id": l.module_id,
                    "module_title": l.module_title,
                    "start": l.start.to_rfc3339(),
                    "end": l.end.to_rfc3339(),
                    "status": l.status(view.now),
                    "mark": l.lesson.mark,
                })).collect::<Vec<_>>(),
            })).collect::<Vec<_>>(),
            "summary": view.summary,
        });

        Self::pretty(&output)
    }

    fn format_diary(&self, report: &DiaryReport, modules: &[Module], _tz: &Tz) -> String {
        let output = json!({
            "overall": Self::stats_json(&report.overall),
            "modules": report.modules.iter().map(|m| {
                let lessons = modules
                    .iter()
                    .find(|module| module.id == m.module_id)
                    .map(|module| module.lessons.iter().map(Self::lesson_json).collect::<Vec<_>>())
                    .unwrap_or_default();
                json!({
                    "id": m.module_id,
                    "title": m.title,
                    "stats": Self::stats_json(&m.stats),
                    "lessons": lessons,
                })
            }).collect::<Vec<_>>(),
        });

        Self::pretty(&output)
    }

    fn format_modules(&self, modules: &[Module]) -> String {
        let output = json!({
            "modules": modules.iter().map(|m| json!({
                "id": m.id,
                "title": m.title,
                "description": m.description,
                "lesson_count": m.lessons.len(),
                "stats": Self::stats_json(&compute_stats(&m.lessons)),
            })).collect::<Vec<_>>(),
        });

        Self::pretty(&output)
    }

    fn format_module(&self, module: &Module, _tz: &Tz) -> String {
        let output = json!({
            "id": module.id,
            "title": module.title,
            "description": module.description,
            "lessons": module.lessons.iter().map(Self::lesson_json).collect::<Vec<_>>(),
            "stats": Self::stats_json(&compute_stats(&module.lessons)),
        });

        Self::pretty(&output)
    }

    fn format_lesson_page(&self, page: &LessonPage, _tz: &Tz) -> String {
        let mut output = Self::lesson_json(&page.lesson);
        output["content"] = json!(page.lesson.content);
        output["viewer"] = json!({
            "username": page.viewer.username,
            "role": page.viewer.role,
        });
        output["participants"] = json!(page.participants);

        Self::pretty(&output)
    }

    fn format_profile(&self, profile: &Profile) -> String {
        Self::pretty(&json!(profile))
    }
}

/// Get the appropriate formatter based on output preference
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::default())
    }
}
