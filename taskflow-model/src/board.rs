//! Board and list types for `TaskFlow`.
//!
//! A [`Board`] is the top-level aggregate: an ordered set of [`List`]
//! columns, each holding an ordered sequence of tasks. These are the
//! snapshot types handed to callers — the board store keeps its own
//! indexed records and assembles these views on read.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::Task;
use crate::user::UserId;

/// Titles of the three lists every new board starts with.
pub const DEFAULT_LIST_TITLES: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Unique identifier for a board.
///
/// Wraps an opaque string, used as-is in external addressing (navigation,
/// routing). Generated ids are UUID v7; fixed seed ids are equally valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    /// Creates a new time-ordered board identifier (UUID v7).
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

impl Default for BoardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BoardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BoardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BoardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Unique identifier for a list within a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Creates a new time-ordered list identifier (UUID v7).
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

impl Default for ListId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ListId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ListId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A named column within a board.
///
/// The title conventionally implies the workflow stage — it drives the
/// status a task receives when moved into this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Unique list identifier.
    pub id: ListId,
    /// List title.
    pub title: String,
    /// Tasks in render order.
    pub tasks: Vec<Task>,
}

/// Top-level project container holding an ordered set of lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Unique board identifier.
    pub id: BoardId,
    /// Board title.
    pub title: String,
    /// Optional longer description.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    /// Lists in render order.
    pub lists: Vec<List>,
    /// Id of the user who created the board.
    pub created_by: UserId,
    /// Creation time in milliseconds since the UNIX epoch.
    pub created_at: u64,
    /// Last mutation time of the board or anything it owns.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<u64>,
    /// `owner/repo` label of a connected GitHub repository, or the raw
    /// input if it did not look like a GitHub URL. Display-only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub github_repo: Option<String>,
}

/// Partial update for a board. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
}
