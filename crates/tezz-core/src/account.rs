//! Account-level records: profile, roles, roster rows and tokens

use crate::types::{Lesson, LessonId};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Role of the logged-in user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Teacher,
    Admin,
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("teacher") => Self::Teacher,
            Some("admin") => Self::Admin,
            // The backend defaults new accounts to students
            _ => Self::Student,
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Teacher => write!(f, "teacher"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// The current user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub discord: Option<String>,
}

impl Profile {
    /// "First Last", falling back to the username
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }
}

/// Partial profile update; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A student on a teacher's lesson roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentMark {
    #[serde(flatten)]
    pub student: Profile,
    #[serde(default)]
    pub mark: Option<u8>,
    /// Mark record to PATCH when grading; absent until the backend creates one
    #[serde(default)]
    pub mark_id: Option<u64>,
    #[serde(default)]
    pub answer_url: Option<String>,
}

/// A mark record as seen by its student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkRecord {
    pub id: u64,
    #[serde(default)]
    pub student: Option<Profile>,
    pub lesson: LessonId,
    #[serde(default)]
    pub score: Option<u8>,
    /// URL of the uploaded answer file
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Bearer tokens issued at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Who else is attached to a lesson, depending on the viewer's role
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "rows")]
pub enum Participants {
    /// Teacher view: every student of the class with their mark
    Roster(Vec<StudentMark>),
    /// Student view: the marks recorded for this lesson
    Marks(Vec<MarkRecord>),
}

impl Participants {
    pub fn len(&self) -> usize {
        match self {
            Self::Roster(rows) => rows.len(),
            Self::Marks(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Data behind the lesson screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonPage {
    pub lesson: Lesson,
    pub viewer: Profile,
    pub participants: Participants,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserialization() {
        let profile: Profile = serde_json::from_str(
            r#"{"id": 1, "username": "aibek", "first_name": "Aibek",
                "last_name": "Sadykov", "email": "a@tezz.kg", "role": "teacher",
                "discord": null, "telegram": "@aibek"}"#,
        )
        .unwrap();

        assert!(profile.is_teacher());
        assert_eq!(profile.display_name(), "Aibek Sadykov");
        assert_eq!(profile.telegram.as_deref(), Some("@aibek"));
    }

    #[test]
    fn test_unknown_role_is_student() {
        let profile: Profile =
            serde_json::from_str(r#"{"id": 2, "username": "x", "role": "guest"}"#).unwrap();
        assert_eq!(profile.role, Role::Student);
        assert_eq!(profile.display_name(), "x");
    }

    #[test]
    fn test_student_mark_flattens_profile() {
        let row: StudentMark = serde_json::from_str(
            r#"{"id": 5, "username": "s1", "role": "student",
                "mark": 75, "mark_id": 40, "answer_url": null}"#,
        )
        .unwrap();
        assert_eq!(row.student.username, "s1");
        assert_eq!(row.mark, Some(75));
        assert_eq!(row.mark_id, Some(40));
    }

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let update = ProfileUpdate {
            telegram: Some("@new".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"telegram":"@new"}"#
        );
        assert!(ProfileUpdate::default().is_empty());
    }
}
