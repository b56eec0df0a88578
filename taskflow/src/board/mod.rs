//! Board state management for `TaskFlow`.
//!
//! The [`BoardStore`] owns the whole board → list → task aggregate and
//! every mutation over it. Storage is arena-style: boards, lists, and
//! tasks live in separate id-indexed maps with explicit parent
//! back-references, and the nested snapshots callers see are recomputed
//! on read. Mutations either fully apply or leave the state untouched;
//! a not-found result is informational, not fatal.

pub mod seed;
pub mod store;

pub use store::BoardStore;

use taskflow_model::board::{BoardId, ListId};
use taskflow_model::task::{MAX_TITLE_LEN, Status, TaskId};
use thiserror::Error;

/// Errors that can occur during board operations.
///
/// Every `Err` means the store was left unchanged. The not-found variants
/// exist so development builds can log or assert; production callers may
/// ignore them, which reproduces the silent no-op the UI relies on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The operation requires a signed-in user.
    #[error("must be signed in to do that")]
    NotAuthenticated,

    /// A title was empty.
    #[error("title cannot be empty")]
    TitleEmpty,

    /// A title exceeded the maximum length.
    #[error("title too long (max {MAX_TITLE_LEN} characters)")]
    TitleTooLong,

    /// No board found with the given id.
    #[error("board not found: {0}")]
    BoardNotFound(String),

    /// No list found with the given id within the addressed board.
    #[error("list not found: {0}")]
    ListNotFound(String),

    /// No task found with the given id within the addressed list.
    #[error("task not found: {0}")]
    TaskNotFound(String),
}

/// Events emitted by the [`BoardStore`] for UI or application layer
/// consumption.
///
/// Emitted best-effort over the channel returned by
/// [`BoardStore::new`]; a dropped receiver never fails an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A new board was created.
    BoardCreated {
        /// The id of the created board.
        board_id: BoardId,
        /// The board title.
        title: String,
    },
    /// A board and everything it owned was deleted.
    BoardDeleted {
        /// The id of the deleted board.
        board_id: BoardId,
    },
    /// A task was created.
    TaskCreated {
        /// The board the task lives in.
        board_id: BoardId,
        /// The list the task was appended to.
        list_id: ListId,
        /// The id of the created task.
        task_id: TaskId,
    },
    /// A task was moved between lists.
    TaskMoved {
        /// The board the move happened in.
        board_id: BoardId,
        /// The id of the moved task.
        task_id: TaskId,
        /// The list the task left.
        from_list: ListId,
        /// The list the task landed in.
        to_list: ListId,
        /// The status derived from the destination list's title.
        status: Status,
    },
    /// A GitHub repository label was attached to a board.
    RepoConnected {
        /// The board the label was attached to.
        board_id: BoardId,
        /// The stored `owner/repo` label (or raw input).
        repo: String,
    },
}
