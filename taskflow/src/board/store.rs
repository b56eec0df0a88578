//! The board store: arena-backed state for boards, lists, and tasks.
//!
//! Records live in three id-indexed maps with explicit parent
//! back-references; sibling order is kept in per-parent id vectors, so a
//! mutation is an index update rather than a deep structural copy. The
//! nested [`Board`] snapshots handed to callers are assembled on read.
//!
//! Ownership invariants maintained by every operation: each task belongs
//! to exactly one list and each list to exactly one board; deleting a
//! parent cascades to everything it owns.

use std::collections::HashMap;
use std::sync::mpsc;
use std::time::{SystemTime, UNIX_EPOCH};

use taskflow_model::board::{Board, BoardId, BoardPatch, DEFAULT_LIST_TITLES, List, ListId};
use taskflow_model::repo::repo_label;
use taskflow_model::task::{MAX_TITLE_LEN, Priority, Status, Task, TaskDraft, TaskId, TaskPatch};
use taskflow_model::user::{User, UserId};

use super::{BoardError, BoardEvent};

/// Stored board fields; child lists are referenced by id, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BoardRecord {
    title: String,
    description: Option<String>,
    lists: Vec<ListId>,
    created_by: UserId,
    created_at: u64,
    updated_at: Option<u64>,
    github_repo: Option<String>,
}

/// Stored list fields; owned tasks are referenced by id, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListRecord {
    board_id: BoardId,
    title: String,
    tasks: Vec<TaskId>,
}

/// Stored task fields with the owning list as a back-reference.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskRecord {
    list_id: ListId,
    title: String,
    description: Option<String>,
    due_date: Option<String>,
    priority: Priority,
    status: Status,
    created_by: UserId,
    created_at: u64,
    updated_at: Option<u64>,
}

/// Owns the board → list → task aggregate and all mutations over it.
///
/// Every mutation runs to completion synchronously and either fully
/// applies or returns an error with the state untouched. Events are
/// emitted best-effort through the channel returned by [`Self::new`].
pub struct BoardStore {
    boards: HashMap<BoardId, BoardRecord>,
    lists: HashMap<ListId, ListRecord>,
    tasks: HashMap<TaskId, TaskRecord>,
    /// Board ids in creation order (render order for the dashboard).
    board_order: Vec<BoardId>,
    current_board: Option<BoardId>,
    events: mpsc::Sender<BoardEvent>,
}

impl BoardStore {
    /// Creates an empty board store and its event receiver.
    ///
    /// The caller should consume events from the returned receiver to
    /// drive UI updates; dropping it is harmless.
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<BoardEvent>) {
        let (tx, rx) = mpsc::channel();
        let store = Self {
            boards: HashMap::new(),
            lists: HashMap::new(),
            tasks: HashMap::new(),
            board_order: Vec::new(),
            current_board: None,
            events: tx,
        };
        (store, rx)
    }

    /// Returns the current timestamp in milliseconds since epoch.
    fn now_ms() -> u64 {
        u64::try_from(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
        )
        .unwrap_or(u64::MAX)
    }

    fn validate_title(title: &str) -> Result<(), BoardError> {
        if title.is_empty() {
            return Err(BoardError::TitleEmpty);
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(BoardError::TitleTooLong);
        }
        Ok(())
    }

    /// Verifies that `list_id` exists and belongs to `board_id`.
    fn check_list_in_board(&self, board_id: &BoardId, list_id: &ListId) -> Result<(), BoardError> {
        if !self.boards.contains_key(board_id) {
            return Err(BoardError::BoardNotFound(board_id.to_string()));
        }
        match self.lists.get(list_id) {
            Some(list) if list.board_id == *board_id => Ok(()),
            _ => Err(BoardError::ListNotFound(list_id.to_string())),
        }
    }

    /// Verifies that `task_id` exists and belongs to `list_id`.
    fn check_task_in_list(&self, list_id: &ListId, task_id: &TaskId) -> Result<(), BoardError> {
        match self.tasks.get(task_id) {
            Some(task) if task.list_id == *list_id => Ok(()),
            _ => Err(BoardError::TaskNotFound(task_id.to_string())),
        }
    }

    fn touch_board(&mut self, board_id: &BoardId, now: u64) {
        if let Some(board) = self.boards.get_mut(board_id) {
            board.updated_at = Some(now);
        }
    }

    // -----------------------------------------------------------------
    // Board operations
    // -----------------------------------------------------------------

    /// Creates a board with the three default lists and makes it current.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotAuthenticated`] if `creator` is `None`
    /// (the session has no signed-in user), or a title validation error.
    pub fn create_board(
        &mut self,
        creator: Option<&User>,
        title: &str,
        description: Option<&str>,
    ) -> Result<BoardId, BoardError> {
        let Some(creator) = creator else {
            tracing::debug!("create_board without a signed-in user");
            return Err(BoardError::NotAuthenticated);
        };
        Self::validate_title(title)?;

        let board_id = BoardId::new();
        let now = Self::now_ms();

        let mut list_ids = Vec::with_capacity(DEFAULT_LIST_TITLES.len());
        for list_title in DEFAULT_LIST_TITLES {
            let list_id = ListId::new();
            self.lists.insert(
                list_id.clone(),
                ListRecord {
                    board_id: board_id.clone(),
                    title: list_title.to_string(),
                    tasks: Vec::new(),
                },
            );
            list_ids.push(list_id);
        }

        self.boards.insert(
            board_id.clone(),
            BoardRecord {
                title: title.to_string(),
                description: description.map(str::to_string),
                lists: list_ids,
                created_by: creator.id.clone(),
                created_at: now,
                updated_at: None,
                github_repo: None,
            },
        );
        self.board_order.push(board_id.clone());
        self.current_board = Some(board_id.clone());

        let _ = self.events.send(BoardEvent::BoardCreated {
            board_id: board_id.clone(),
            title: title.to_string(),
        });

        Ok(board_id)
    }

    /// Merges the patch into the matching board and refreshes its
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BoardNotFound`] (state unchanged) or a title
    /// validation error.
    pub fn update_board(&mut self, board_id: &BoardId, patch: BoardPatch) -> Result<(), BoardError> {
        if let Some(title) = &patch.title {
            Self::validate_title(title)?;
        }
        let board = self
            .boards
            .get_mut(board_id)
            .ok_or_else(|| BoardError::BoardNotFound(board_id.to_string()))?;

        if let Some(title) = patch.title {
            board.title = title;
        }
        if let Some(description) = patch.description {
            board.description = Some(description);
        }
        board.updated_at = Some(Self::now_ms());
        Ok(())
    }

    /// Deletes a board, cascading to its lists and their tasks.
    ///
    /// If the deleted board was current, the first remaining board (in
    /// creation order) becomes current, or none.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BoardNotFound`] if the board does not exist.
    pub fn delete_board(&mut self, board_id: &BoardId) -> Result<(), BoardError> {
        let board = self
            .boards
            .remove(board_id)
            .ok_or_else(|| BoardError::BoardNotFound(board_id.to_string()))?;

        for list_id in &board.lists {
            if let Some(list) = self.lists.remove(list_id) {
                for task_id in &list.tasks {
                    self.tasks.remove(task_id);
                }
            }
        }
        self.board_order.retain(|id| id != board_id);

        if self.current_board.as_ref() == Some(board_id) {
            self.current_board = self.board_order.first().cloned();
        }

        let _ = self.events.send(BoardEvent::BoardDeleted {
            board_id: board_id.clone(),
        });
        Ok(())
    }

    /// Makes the given board the current one.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BoardNotFound`] if the board does not exist.
    pub fn set_current_board(&mut self, board_id: &BoardId) -> Result<(), BoardError> {
        if !self.boards.contains_key(board_id) {
            return Err(BoardError::BoardNotFound(board_id.to_string()));
        }
        self.current_board = Some(board_id.clone());
        Ok(())
    }

    /// Stores the GitHub repository label extracted from `repo_url` on
    /// the matching board and returns it.
    ///
    /// Input that does not look like a GitHub URL is stored verbatim —
    /// the label is never validated against the GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BoardNotFound`] if the board does not exist.
    pub fn connect_github_repo(
        &mut self,
        board_id: &BoardId,
        repo_url: &str,
    ) -> Result<String, BoardError> {
        let board = self
            .boards
            .get_mut(board_id)
            .ok_or_else(|| BoardError::BoardNotFound(board_id.to_string()))?;

        let label = repo_label(repo_url);
        board.github_repo = Some(label.clone());
        board.updated_at = Some(Self::now_ms());

        let _ = self.events.send(BoardEvent::RepoConnected {
            board_id: board_id.clone(),
            repo: label.clone(),
        });
        Ok(label)
    }

    // -----------------------------------------------------------------
    // List operations
    // -----------------------------------------------------------------

    /// Appends an empty list to the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BoardNotFound`] or a title validation error.
    pub fn create_list(&mut self, board_id: &BoardId, title: &str) -> Result<ListId, BoardError> {
        Self::validate_title(title)?;
        let now = Self::now_ms();
        let board = self
            .boards
            .get_mut(board_id)
            .ok_or_else(|| BoardError::BoardNotFound(board_id.to_string()))?;

        let list_id = ListId::new();
        board.lists.push(list_id.clone());
        board.updated_at = Some(now);
        self.lists.insert(
            list_id.clone(),
            ListRecord {
                board_id: board_id.clone(),
                title: title.to_string(),
                tasks: Vec::new(),
            },
        );
        Ok(list_id)
    }

    /// Renames a list. Untouched siblings keep their order.
    ///
    /// Renaming changes the status every task subsequently moved into
    /// this list receives — the title is the sole source of truth for
    /// status-on-drop.
    ///
    /// # Errors
    ///
    /// Returns a not-found error (state unchanged) or a title validation
    /// error.
    pub fn update_list(
        &mut self,
        board_id: &BoardId,
        list_id: &ListId,
        title: &str,
    ) -> Result<(), BoardError> {
        Self::validate_title(title)?;
        self.check_list_in_board(board_id, list_id)?;

        if let Some(list) = self.lists.get_mut(list_id) {
            list.title = title.to_string();
        }
        self.touch_board(board_id, Self::now_ms());
        Ok(())
    }

    /// Removes a list and every task it owns.
    ///
    /// # Errors
    ///
    /// Returns a not-found error; state unchanged in that case.
    pub fn delete_list(&mut self, board_id: &BoardId, list_id: &ListId) -> Result<(), BoardError> {
        self.check_list_in_board(board_id, list_id)?;

        if let Some(list) = self.lists.remove(list_id) {
            for task_id in &list.tasks {
                self.tasks.remove(task_id);
            }
        }
        let now = Self::now_ms();
        if let Some(board) = self.boards.get_mut(board_id) {
            board.lists.retain(|id| id != list_id);
            board.updated_at = Some(now);
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Task operations
    // -----------------------------------------------------------------

    /// Creates a task at the end of the given list.
    ///
    /// The store assigns the id, creator, and creation timestamp; the
    /// rest comes from the draft.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotAuthenticated`] if `creator` is `None`,
    /// a not-found error, or a title validation error.
    pub fn create_task(
        &mut self,
        creator: Option<&User>,
        board_id: &BoardId,
        list_id: &ListId,
        draft: TaskDraft,
    ) -> Result<TaskId, BoardError> {
        let Some(creator) = creator else {
            tracing::debug!("create_task without a signed-in user");
            return Err(BoardError::NotAuthenticated);
        };
        Self::validate_title(&draft.title)?;
        self.check_list_in_board(board_id, list_id)?;

        let task_id = TaskId::new();
        let now = Self::now_ms();
        self.tasks.insert(
            task_id.clone(),
            TaskRecord {
                list_id: list_id.clone(),
                title: draft.title,
                description: draft.description,
                due_date: draft.due_date,
                priority: draft.priority,
                status: draft.status,
                created_by: creator.id.clone(),
                created_at: now,
                updated_at: None,
            },
        );
        if let Some(list) = self.lists.get_mut(list_id) {
            list.tasks.push(task_id.clone());
        }
        self.touch_board(board_id, now);

        let _ = self.events.send(BoardEvent::TaskCreated {
            board_id: board_id.clone(),
            list_id: list_id.clone(),
            task_id: task_id.clone(),
        });
        Ok(task_id)
    }

    /// Merges the patch into the matching task and refreshes the task's
    /// and board's `updated_at`.
    ///
    /// The full board/list/task ownership path must match.
    ///
    /// # Errors
    ///
    /// Returns a not-found error (state unchanged) or a title validation
    /// error.
    pub fn update_task(
        &mut self,
        board_id: &BoardId,
        list_id: &ListId,
        task_id: &TaskId,
        patch: TaskPatch,
    ) -> Result<(), BoardError> {
        if let Some(title) = &patch.title {
            Self::validate_title(title)?;
        }
        self.check_list_in_board(board_id, list_id)?;
        self.check_task_in_list(list_id, task_id)?;

        let now = Self::now_ms();
        if let Some(task) = self.tasks.get_mut(task_id) {
            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = Some(description);
            }
            if let Some(due_date) = patch.due_date {
                task.due_date = Some(due_date);
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(status) = patch.status {
                task.status = status;
            }
            task.updated_at = Some(now);
        }
        self.touch_board(board_id, now);
        Ok(())
    }

    /// Removes a task from its list.
    ///
    /// # Errors
    ///
    /// Returns a not-found error; state unchanged in that case.
    pub fn delete_task(
        &mut self,
        board_id: &BoardId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<(), BoardError> {
        self.check_list_in_board(board_id, list_id)?;
        self.check_task_in_list(list_id, task_id)?;

        self.tasks.remove(task_id);
        if let Some(list) = self.lists.get_mut(list_id) {
            list.tasks.retain(|id| id != task_id);
        }
        self.touch_board(board_id, Self::now_ms());
        Ok(())
    }

    /// Moves a task to the end of another list in the same board,
    /// re-deriving its status from the destination list's title.
    ///
    /// The whole path — board, source list, task membership, destination
    /// list — is validated before anything is touched, so a missing
    /// destination makes the move a no-op instead of dropping the task.
    /// Remaining tasks in the source list keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns a not-found error; state unchanged in that case.
    pub fn move_task(
        &mut self,
        board_id: &BoardId,
        from_list_id: &ListId,
        to_list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<(), BoardError> {
        self.check_list_in_board(board_id, from_list_id)?;
        self.check_task_in_list(from_list_id, task_id)?;
        self.check_list_in_board(board_id, to_list_id)?;

        let status = match self.lists.get(to_list_id) {
            Some(to_list) => Status::from_list_title(&to_list.title),
            None => return Err(BoardError::ListNotFound(to_list_id.to_string())),
        };
        let now = Self::now_ms();

        if let Some(from_list) = self.lists.get_mut(from_list_id) {
            from_list.tasks.retain(|id| id != task_id);
        }
        if let Some(to_list) = self.lists.get_mut(to_list_id) {
            to_list.tasks.push(task_id.clone());
        }
        if let Some(task) = self.tasks.get_mut(task_id) {
            task.list_id = to_list_id.clone();
            task.status = status;
            task.updated_at = Some(now);
        }
        self.touch_board(board_id, now);

        let _ = self.events.send(BoardEvent::TaskMoved {
            board_id: board_id.clone(),
            task_id: task_id.clone(),
            from_list: from_list_id.clone(),
            to_list: to_list_id.clone(),
            status,
        });
        Ok(())
    }

    // -----------------------------------------------------------------
    // Reads (snapshot assembly)
    // -----------------------------------------------------------------

    /// Returns all boards as nested snapshots, in creation order.
    #[must_use]
    pub fn boards(&self) -> Vec<Board> {
        self.board_order
            .iter()
            .filter_map(|id| self.board(id))
            .collect()
    }

    /// Assembles the nested snapshot of one board.
    #[must_use]
    pub fn board(&self, board_id: &BoardId) -> Option<Board> {
        let record = self.boards.get(board_id)?;
        let lists = record
            .lists
            .iter()
            .filter_map(|list_id| self.assemble_list(list_id))
            .collect();
        Some(Board {
            id: board_id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            lists,
            created_by: record.created_by.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            github_repo: record.github_repo.clone(),
        })
    }

    /// The current board's snapshot, if one is selected.
    #[must_use]
    pub fn current_board(&self) -> Option<Board> {
        self.current_board.as_ref().and_then(|id| self.board(id))
    }

    /// The current board's id, if one is selected.
    #[must_use]
    pub fn current_board_id(&self) -> Option<&BoardId> {
        self.current_board.as_ref()
    }

    /// Number of boards in the store.
    #[must_use]
    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    fn assemble_list(&self, list_id: &ListId) -> Option<List> {
        let record = self.lists.get(list_id)?;
        let tasks = record
            .tasks
            .iter()
            .filter_map(|task_id| self.assemble_task(task_id))
            .collect();
        Some(List {
            id: list_id.clone(),
            title: record.title.clone(),
            tasks,
        })
    }

    fn assemble_task(&self, task_id: &TaskId) -> Option<Task> {
        let record = self.tasks.get(task_id)?;
        Some(Task {
            id: task_id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            due_date: record.due_date.clone(),
            priority: record.priority,
            status: record.status,
            created_by: record.created_by.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Adopts a fully-formed board snapshot, keeping its fixed ids.
    ///
    /// Used for seeding; the first adopted board becomes current if no
    /// board is selected yet.
    pub(crate) fn insert_board(&mut self, board: Board) {
        let mut list_ids = Vec::with_capacity(board.lists.len());
        for list in board.lists {
            let mut task_ids = Vec::with_capacity(list.tasks.len());
            for task in list.tasks {
                task_ids.push(task.id.clone());
                self.tasks.insert(
                    task.id,
                    TaskRecord {
                        list_id: list.id.clone(),
                        title: task.title,
                        description: task.description,
                        due_date: task.due_date,
                        priority: task.priority,
                        status: task.status,
                        created_by: task.created_by,
                        created_at: task.created_at,
                        updated_at: task.updated_at,
                    },
                );
            }
            list_ids.push(list.id.clone());
            self.lists.insert(
                list.id,
                ListRecord {
                    board_id: board.id.clone(),
                    title: list.title,
                    tasks: task_ids,
                },
            );
        }
        self.boards.insert(
            board.id.clone(),
            BoardRecord {
                title: board.title,
                description: board.description,
                lists: list_ids,
                created_by: board.created_by,
                created_at: board.created_at,
                updated_at: board.updated_at,
                github_repo: board.github_repo,
            },
        );
        self.board_order.push(board.id.clone());
        if self.current_board.is_none() {
            self.current_board = Some(board.id);
        }
    }
}
