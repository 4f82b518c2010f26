//! Core domain types for tezz
//!
//! Modules and lessons as the dashboard sees them. The backend's JSON is
//! read through lenient raw shapes ([`RawModule`], [`RawLesson`]) so that a
//! missing or malformed optional field never fails a whole page load: it
//! simply becomes absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Backend identifier of a module
///
/// # Examples
/// ```
/// use tezz_core::types::ModuleId;
///
/// let id = ModuleId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ModuleId(u64);

impl ModuleId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend identifier of a lesson
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LessonId(u64);

impl LessonId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lesson as returned by the backend, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLesson {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// ISO-8601 with offset, e.g. `2024-01-01T10:00:00+06:00`
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    /// Mark of the current viewer; kept as raw JSON so a non-numeric value
    /// can be dropped instead of failing deserialization
    #[serde(default)]
    pub student_mark: Option<serde_json::Value>,
    #[serde(default)]
    pub module: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Module as returned by the backend, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawModule {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lessons: Vec<RawLesson>,
}

/// A learning unit, optionally time-boxed and optionally marked
///
/// Deserializes from the backend shape via [`RawLesson`].
///
/// # Examples
/// ```
/// use tezz_core::types::Lesson;
///
/// let lesson: Lesson = serde_json::from_str(r#"{
///     "id": 3,
///     "title": "Ownership",
///     "start_time": "2024-01-01T10:00:00+06:00",
///     "end_time": null,
///     "student_mark": 85
/// }"#).unwrap();
///
/// assert_eq!(lesson.mark, Some(85.0));
/// assert!(lesson.end_time.is_none());
/// assert!(!lesson.is_scheduled());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLesson")]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Viewer's mark, nominally 0..=100 but never clamped
    #[serde(rename = "student_mark")]
    pub mark: Option<f64>,
    /// Owning module, filled in when the lesson arrives inside a module
    #[serde(rename = "module", skip_serializing_if = "Option::is_none")]
    pub module_id: Option<ModuleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Lesson {
    /// Validate a raw lesson
    pub fn from_raw(raw: RawLesson) -> Self {
        Self {
            id: LessonId::new(raw.id),
            title: raw.title.unwrap_or_default(),
            content: raw.content.filter(|c| !c.is_empty()),
            start_time: parse_timestamp(raw.start_time.as_deref()),
            end_time: parse_timestamp(raw.end_time.as_deref()),
            mark: parse_mark(raw.student_mark),
            module_id: raw.module.map(ModuleId::new),
            created_at: parse_timestamp(raw.created_at.as_deref()),
            updated_at: parse_timestamp(raw.updated_at.as_deref()),
        }
    }

    /// Both ends of the time slot are known
    pub fn is_scheduled(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }

    pub fn is_marked(&self) -> bool {
        self.mark.is_some()
    }
}

impl From<RawLesson> for Lesson {
    fn from(raw: RawLesson) -> Self {
        Self::from_raw(raw)
    }
}

/// A course unit with its ordered lessons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawModule")]
pub struct Module {
    pub id: ModuleId,
    pub title: String,
    pub description: String,
    pub lessons: Vec<Lesson>,
}

impl Module {
    /// Create a module, pointing every lesson back at it
    pub fn new(
        id: ModuleId,
        title: impl Into<String>,
        description: impl Into<String>,
        lessons: Vec<Lesson>,
    ) -> Self {
        let lessons = lessons
            .into_iter()
            .map(|mut lesson| {
                lesson.module_id = Some(id);
                lesson
            })
            .collect();

        Self {
            id,
            title: title.into(),
            description: description.into(),
            lessons,
        }
    }

    /// Validate a raw module and its lessons
    pub fn from_raw(raw: RawModule) -> Self {
        Self::new(
            ModuleId::new(raw.id),
            raw.title.unwrap_or_default(),
            raw.description.unwrap_or_default(),
            raw.lessons.into_iter().map(Lesson::from_raw).collect(),
        )
    }
}

impl From<RawModule> for Module {
    fn from(raw: RawModule) -> Self {
        Self::from_raw(raw)
    }
}

/// A scheduled lesson flattened out of its module
///
/// Only lessons with both timestamps become annotated lessons, so `start`
/// and `end` are plain values here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedLesson {
    pub lesson: Lesson,
    pub module_id: ModuleId,
    pub module_title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AnnotatedLesson {
    /// Annotate a lesson with its owning module
    ///
    /// Returns `None` when either timestamp is missing.
    pub fn new(lesson: &Lesson, module: &Module) -> Option<Self> {
        let (start, end) = lesson.start_time.zip(lesson.end_time)?;
        Some(Self {
            lesson: lesson.clone(),
            module_id: module.id,
            module_title: module.title.clone(),
            start,
            end,
        })
    }

    pub fn id(&self) -> LessonId {
        self.lesson.id
    }

    pub fn title(&self) -> &str {
        &self.lesson.title
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            debug!("Ignoring unparseable timestamp '{}': {}", value, e);
            None
        }
    }
}

fn parse_mark(value: Option<serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::Number(n) => n.as_f64(),
        other => {
            debug!("Ignoring non-numeric mark: {}", other);
            None
        }
    }
}
