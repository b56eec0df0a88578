//! Task types for `TaskFlow`.
//!
//! Defines the [`Task`] snapshot type, its [`Priority`] and [`Status`]
//! enums, and the title-based status derivation used when a task is moved
//! between lists. Also defines [`TaskDraft`] (creation input) and
//! [`TaskPatch`] (partial update input).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::UserId;

/// Maximum allowed title length in characters, shared by boards, lists,
/// and tasks.
pub const MAX_TITLE_LEN: usize = 256;

/// Unique identifier for a task.
///
/// Wraps an opaque string. Generated ids are UUID v7 for time-ordering;
/// fixed string ids (seed data such as `task-1`) are equally valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (the default for new tasks).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Workflow status of a task.
///
/// Any status is reachable from any other — there is no ordering or
/// workflow enforcement. Status changes happen either explicitly through
/// a task update or implicitly when a task is moved, via
/// [`Status::from_list_title`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Not started.
    #[default]
    Todo,
    /// Actively being worked on.
    InProgress,
    /// Awaiting review.
    Review,
    /// Completed.
    Done,
}

impl Status {
    /// Derives the status a task takes on when dropped into a list with
    /// the given title.
    ///
    /// Case-insensitive substring match, in precedence order: a title
    /// containing `done` wins, then `progress`, then `review`; anything
    /// else falls back to [`Status::Todo`]. The list title is the sole
    /// source of truth here — renaming a list changes the status every
    /// task subsequently moved into it receives.
    #[must_use]
    pub fn from_list_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        if lower.contains("done") {
            Self::Done
        } else if lower.contains("progress") {
            Self::InProgress
        } else if lower.contains("review") {
            Self::Review
        } else {
            Self::Todo
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Review => write!(f, "review"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// A unit of work owned by exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Optional longer description.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    /// Optional due date, kept as an opaque display string and never
    /// interpreted.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub due_date: Option<String>,
    /// Task priority.
    pub priority: Priority,
    /// Workflow status.
    pub status: Status,
    /// Id of the user who created the task.
    pub created_by: UserId,
    /// Creation time in milliseconds since the UNIX epoch.
    pub created_at: u64,
    /// Last mutation time in milliseconds since the UNIX epoch, if the
    /// task has been mutated since creation.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<u64>,
}

/// Caller-supplied fields for creating a task.
///
/// Everything except the id, creator, and creation timestamp, which the
/// board store assigns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Optional due date string.
    pub due_date: Option<String>,
    /// Task priority.
    pub priority: Priority,
    /// Initial workflow status.
    pub status: Status,
}

impl TaskDraft {
    /// A draft with the given title and defaults for everything else.
    #[must_use]
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

/// Partial update for a task. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New due date string.
    pub due_date: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New status.
    pub status: Option<Status>,
}
