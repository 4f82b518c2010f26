//! Shared test utilities for unit tests
//!
//! Integration tests in the root package have their own helpers in
//! `tests/common/mod.rs`, since `#[cfg(test)]` items are not visible there.

use crate::types::{Lesson, LessonId, Module, ModuleId};
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

// Serializes environment variable modifications across tests
pub static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// RAII guard restoring environment variables on drop
pub struct EnvVarGuard {
    vars: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.push((key.to_string(), env::var(key).ok()));
        // env::set_var is unsafe since Rust 1.82
        unsafe {
            env::set_var(key, value);
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.vars.iter().rev() {
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

impl Default for EnvVarGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// UTC instant shorthand
pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

/// Lesson with a mark and no time slot
pub fn marked_lesson(id: u64, mark: Option<f64>) -> Lesson {
    Lesson {
        id: LessonId::new(id),
        title: format!("Lesson {id}"),
        content: None,
        start_time: None,
        end_time: None,
        mark,
        module_id: None,
        created_at: None,
        updated_at: None,
    }
}

/// Lesson occupying `[start, end]`
pub fn timed_lesson(id: u64, start: DateTime<Utc>, end: DateTime<Utc>) -> Lesson {
    Lesson {
        start_time: Some(start),
        end_time: Some(end),
        ..marked_lesson(id, None)
    }
}

pub fn module(id: u64, title: &str, lessons: Vec<Lesson>) -> Module {
    Module::new(ModuleId::new(id), title, "", lessons)
}
