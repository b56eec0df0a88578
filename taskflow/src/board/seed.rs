//! Demo board seeding.
//!
//! Board state is never persisted, so every process start seeds the
//! "Getting Started" board with fixed ids. The fixed ids keep external
//! references (navigation links, walkthrough docs) stable across
//! restarts.

use std::time::{SystemTime, UNIX_EPOCH};

use taskflow_model::board::{Board, BoardId, List, ListId};
use taskflow_model::task::{Priority, Status, Task, TaskId};
use taskflow_model::user::UserId;

use super::BoardStore;

/// Id of the seeded demo board.
pub const DEMO_BOARD_ID: &str = "demo-board-1";

/// Creator id stamped on all seeded entities.
pub const SEED_USER_ID: &str = "system";

/// Seeds the "Getting Started" demo board into the store.
///
/// Lists: "To Do" with two tasks, "In Progress" with one, "Done" with
/// one. Becomes the current board if none is selected yet.
pub fn seed_demo_board(store: &mut BoardStore) {
    let now = u64::try_from(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis(),
    )
    .unwrap_or(u64::MAX);

    let task = |id: &str, title: &str, description: &str, priority: Priority, status: Status| Task {
        id: TaskId::from(id),
        title: title.to_string(),
        description: Some(description.to_string()),
        due_date: None,
        priority,
        status,
        created_by: UserId::from(SEED_USER_ID),
        created_at: now,
        updated_at: None,
    };

    let board = Board {
        id: BoardId::from(DEMO_BOARD_ID),
        title: "Getting Started".to_string(),
        description: Some(
            "Welcome to TaskFlow! This is a demo board to help you get started.".to_string(),
        ),
        lists: vec![
            List {
                id: ListId::from("list-1"),
                title: "To Do".to_string(),
                tasks: vec![
                    task(
                        "task-1",
                        "Create your first board",
                        "Click the \"New Board\" button to create your own board",
                        Priority::Medium,
                        Status::Todo,
                    ),
                    task(
                        "task-2",
                        "Add tasks to your board",
                        "Click the \"Add Task\" button in any list to create tasks",
                        Priority::Low,
                        Status::Todo,
                    ),
                ],
            },
            List {
                id: ListId::from("list-2"),
                title: "In Progress".to_string(),
                tasks: vec![task(
                    "task-3",
                    "Learn to use TaskFlow",
                    "Explore the different features of TaskFlow",
                    Priority::High,
                    Status::InProgress,
                )],
            },
            List {
                id: ListId::from("list-3"),
                title: "Done".to_string(),
                tasks: vec![task(
                    "task-4",
                    "Sign up for TaskFlow",
                    "You have successfully signed up for TaskFlow",
                    Priority::Medium,
                    Status::Done,
                )],
            },
        ],
        created_by: UserId::from(SEED_USER_ID),
        created_at: now,
        updated_at: None,
        github_repo: None,
    };

    store.insert_board(board);
    tracing::debug!(board = DEMO_BOARD_ID, "seeded demo board");
}
