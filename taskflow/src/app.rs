//! Application wiring and lifecycle.
//!
//! [`App`] constructs both stores, restores the persisted session, seeds
//! the demo board, and hands the pair to the embedding UI layer. It also
//! carries the one dependency between the stores: board and task
//! creation read the current user from the session store to stamp
//! ownership.

use std::sync::mpsc;

use taskflow_model::board::{BoardId, ListId};
use taskflow_model::task::{TaskDraft, TaskId};

use crate::board::seed::seed_demo_board;
use crate::board::{BoardError, BoardEvent, BoardStore};
use crate::config::{AppConfig, StorageKind};
use crate::session::SessionStore;
use crate::storage::{FileStorage, MemoryStorage, SessionStorage};

/// Owns the session and board stores for one process.
pub struct App {
    /// Identity state: current user, token, login/logout transitions.
    pub session: SessionStore,
    /// Domain state: boards, lists, tasks, and all mutations over them.
    pub boards: BoardStore,
}

impl App {
    /// Builds the stores, restores the persisted session, and seeds the
    /// demo board when configured.
    ///
    /// Returns the app and the board event receiver; the caller should
    /// consume events to drive UI updates (dropping the receiver is
    /// harmless).
    #[must_use]
    pub fn init(config: &AppConfig) -> (Self, mpsc::Receiver<BoardEvent>) {
        let storage = build_storage(config);

        let mut session = SessionStore::new(storage);
        session.restore();

        let (mut boards, events) = BoardStore::new();
        if config.seed_demo_board {
            seed_demo_board(&mut boards);
        }

        tracing::info!(
            authenticated = session.is_authenticated(),
            boards = boards.board_count(),
            "taskflow initialized"
        );
        (Self { session, boards }, events)
    }

    /// Creates a board owned by the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotAuthenticated`] when nobody is signed in,
    /// or any error from [`BoardStore::create_board`].
    pub fn create_board(
        &mut self,
        title: &str,
        description: Option<&str>,
    ) -> Result<BoardId, BoardError> {
        let user = self.session.current_user().cloned();
        self.boards.create_board(user.as_ref(), title, description)
    }

    /// Creates a task owned by the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotAuthenticated`] when nobody is signed in,
    /// or any error from [`BoardStore::create_task`].
    pub fn create_task(
        &mut self,
        board_id: &BoardId,
        list_id: &ListId,
        draft: TaskDraft,
    ) -> Result<TaskId, BoardError> {
        let user = self.session.current_user().cloned();
        self.boards.create_task(user.as_ref(), board_id, list_id, draft)
    }

    /// Terminal lifecycle transition.
    ///
    /// Session storage is write-through, so there is nothing to flush;
    /// the hook exists so embedders have a defined teardown point.
    pub fn shutdown(self) {
        tracing::info!("taskflow shutting down");
    }
}

/// Builds the configured storage backend.
///
/// A file backend with no resolvable path degrades to in-memory storage
/// with a warning rather than failing startup.
fn build_storage(config: &AppConfig) -> Box<dyn SessionStorage> {
    match config.storage {
        StorageKind::Memory => Box::new(MemoryStorage::new()),
        StorageKind::File => {
            let path = match &config.storage_path {
                Some(path) => Some(path.clone()),
                None => match FileStorage::default_path() {
                    Ok(path) => Some(path),
                    Err(e) => {
                        tracing::warn!(error = %e, "no session file path; using in-memory storage");
                        None
                    }
                },
            };
            match path {
                Some(path) => Box::new(FileStorage::open(path)),
                None => Box::new(MemoryStorage::new()),
            }
        }
    }
}
