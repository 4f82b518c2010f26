//! Common test utilities and helpers for tezz tests
//!
//! Builders for lessons and modules plus a sample backend payload, so the
//! integration tests read as scenarios rather than struct literals.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Value, json};
use tezz::{Lesson, LessonId, Module, ModuleId};

/// UTC instant from calendar parts
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

/// Builder for creating test Lesson instances
pub struct LessonBuilder {
    id: u64,
    title: String,
    content: Option<String>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    mark: Option<f64>,
}

impl LessonBuilder {
    /// Unscheduled, unmarked lesson
    pub fn new(id: u64) -> Self {
        Self {
            id,
            title: format!("Lesson {id}"),
            content: None,
            start_time: None,
            end_time: None,
            mark: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Schedule the lesson at `start` for `minutes`
    pub fn at(mut self, start: DateTime<Utc>, minutes: i64) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(start + Duration::minutes(minutes));
        self
    }

    pub fn starting(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn with_mark(mut self, mark: f64) -> Self {
        self.mark = Some(mark);
        self
    }

    pub fn build(self) -> Lesson {
        Lesson {
            id: LessonId::new(self.id),
            title: self.title,
            content: self.content,
            start_time: self.start_time,
            end_time: self.end_time,
            mark: self.mark,
            module_id: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Builder for creating test Module instances
pub struct ModuleBuilder {
    id: u64,
    title: String,
    description: String,
    lessons: Vec<Lesson>,
}

impl ModuleBuilder {
    pub fn new(id: u64, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: String::new(),
            lessons: Vec::new(),
        }
    }

    pub fn with_lesson(mut self, lesson: LessonBuilder) -> Self {
        self.lessons.push(lesson.build());
        self
    }

    pub fn build(self) -> Module {
        Module::new(
            ModuleId::new(self.id),
            self.title,
            self.description,
            self.lessons,
        )
    }
}

/// A `GET modules/` payload as the backend sends it, including the
/// malformed records clients have to tolerate
pub fn sample_modules_json() -> Value {
    json!([
        {
            "id": 1,
            "title": "Rust",
            "description": "Systems programming",
            "lessons": [
                {
                    "id": 11,
                    "title": "Ownership",
                    "content": "Moves and borrows",
                    "start_time": "2024-03-11T09:00:00+06:00",
                    "end_time": "2024-03-11T10:30:00+06:00",
                    "student_mark": 80
                },
                {
                    "id": 12,
                    "title": "Traits",
                    "start_time": "2024-03-13T09:00:00+06:00",
                    "end_time": "2024-03-13T10:30:00+06:00",
                    "student_mark": null
                },
                {
                    "id": 13,
                    "title": "Async",
                    "start_time": "2024-03-15T09:00:00+06:00",
                    "end_time": "2024-03-15T10:30:00+06:00",
                    "student_mark": 60
                },
                {
                    "id": 14,
                    "title": "Reading list",
                    "start_time": null,
                    "end_time": null,
                    "student_mark": "A+"
                }
            ]
        },
        {
            "id": 2,
            "title": "Algebra",
            "description": "Linear algebra",
            "lessons": [
                {
                    "id": 21,
                    "title": "Matrices",
                    "start_time": "2024-03-13T08:00:00+06:00",
                    "end_time": "2024-03-13T08:45:00+06:00",
                    "student_mark": 100
                },
                {
                    "id": 22,
                    "title": "Late evening",
                    "start_time": "2024-03-17T23:30:00+06:00",
                    "end_time": "not a timestamp"
                }
            ]
        },
        {
            "id": 3,
            "title": "Empty",
            "description": "",
            "lessons": []
        }
    ])
}
