//! Entity snapshots supplied by the data layer
//!
//! People and courses are provided fresh on every generation call and are
//! read-only to the engine. Nothing in this module is persisted here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organizational roles known to the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Hr,
    Employee,
    Intern,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hr => "hr",
            Role::Employee => "employee",
            Role::Intern => "intern",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "hr" => Some(Role::Hr),
            "employee" => Some(Role::Employee),
            "intern" => Some(Role::Intern),
            _ => None,
        }
    }

    /// End-learner roles are the subject of person-scoped reports.
    pub fn is_learner(&self) -> bool {
        matches!(self, Role::Employee | Role::Intern)
    }
}

/// Progress of one person on one assigned course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseProgress {
    pub course_id: String,

    /// Completion percentage, 0-100
    pub progress_percent: f64,

    /// When the course was assigned to the person
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,

    /// When the course reached 100%, if it has
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    /// Final assessment score, 0-100
    #[serde(default)]
    pub score: Option<f64>,

    /// Number of assessment attempts
    #[serde(default)]
    pub attempts: u32,
}

impl CourseProgress {
    pub fn is_complete(&self) -> bool {
        self.progress_percent >= 100.0
    }
}

/// Snapshot of a person record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: Role,

    /// Courses currently assigned to this person
    #[serde(default)]
    pub assigned_course_ids: Vec<String>,

    /// Per-course progress entries
    #[serde(default)]
    pub progress: Vec<CourseProgress>,
}

impl Person {
    /// Look up the progress entry for an assigned course, if one exists.
    pub fn progress_for(&self, course_id: &str) -> Option<&CourseProgress> {
        self.progress.iter().find(|p| p.course_id == course_id)
    }
}

/// Snapshot of a course record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub estimated_minutes: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
