//! Integration tests for the board store: the seeded demo walkthrough,
//! the full board/list/task lifecycle, and the move-with-derivation
//! behavior, driven through [`App`] the way a UI layer would.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use taskflow::app::App;
use taskflow::board::seed::DEMO_BOARD_ID;
use taskflow::board::BoardError;
use taskflow::config::{AppConfig, StorageKind};
use taskflow_model::board::{BoardId, BoardPatch, ListId};
use taskflow_model::task::{Status, TaskDraft, TaskId, TaskPatch};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn memory_config() -> AppConfig {
    AppConfig {
        storage: StorageKind::Memory,
        storage_path: None,
        seed_demo_board: true,
    }
}

/// Starts an app with the seeded demo board and a signed-in user.
fn make_app() -> App {
    let (mut app, _events) = App::init(&memory_config());
    app.session.login("alice@example.com", "pw").unwrap();
    app
}

fn demo_board() -> BoardId {
    BoardId::from(DEMO_BOARD_ID)
}

// ---------------------------------------------------------------------------
// Seeded demo walkthrough
// ---------------------------------------------------------------------------

#[test]
fn seed_board_move_task_to_done() {
    let mut app = make_app();
    let board_id = demo_board();

    app.boards
        .move_task(
            &board_id,
            &ListId::from("list-1"),
            &ListId::from("list-3"),
            &TaskId::from("task-1"),
        )
        .unwrap();

    let board = app.boards.board(&board_id).unwrap();
    let todo = &board.lists[0];
    let done = &board.lists[2];

    assert_eq!(todo.tasks.len(), 1);
    assert_eq!(todo.tasks[0].id, TaskId::from("task-2"));
    assert_eq!(done.tasks.len(), 2);

    let moved = done
        .tasks
        .iter()
        .find(|t| t.id == TaskId::from("task-1"))
        .unwrap();
    assert_eq!(moved.status, Status::Done);
    assert!(moved.updated_at.is_some());
    assert!(board.updated_at.is_some());
}

#[test]
fn seed_board_is_present_and_current_on_every_start() {
    let (app, _events) = App::init(&memory_config());
    let board = app.boards.current_board().unwrap();
    assert_eq!(board.id, demo_board());
    assert_eq!(board.title, "Getting Started");
    assert_eq!(
        board.lists.iter().map(|l| l.tasks.len()).sum::<usize>(),
        4
    );
}

// ---------------------------------------------------------------------------
// Board lifecycle
// ---------------------------------------------------------------------------

#[test]
fn new_board_has_three_empty_default_lists_owned_by_creator() {
    let mut app = make_app();
    let user_id = app.session.current_user().unwrap().id.clone();

    let board_id = app.create_board("Launch plan", Some("Q3 launch")).unwrap();
    let board = app.boards.board(&board_id).unwrap();

    let titles: Vec<&str> = board.lists.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["To Do", "In Progress", "Done"]);
    assert!(board.lists.iter().all(|l| l.tasks.is_empty()));
    assert_eq!(board.created_by, user_id);
    assert_eq!(app.boards.current_board_id(), Some(&board_id));
}

#[test]
fn unknown_board_id_is_a_noop_for_every_operation() {
    let mut app = make_app();
    let before = app.boards.boards();
    let nope = BoardId::from("nope");
    let list = ListId::from("list-1");
    let task = TaskId::from("task-1");

    assert!(app
        .boards
        .update_board(&nope, BoardPatch::default())
        .is_err());
    assert!(app.boards.delete_board(&nope).is_err());
    assert!(app.boards.create_list(&nope, "X").is_err());
    assert!(app.boards.update_list(&nope, &list, "X").is_err());
    assert!(app.boards.delete_list(&nope, &list).is_err());
    assert!(app.create_task(&nope, &list, TaskDraft::titled("X")).is_err());
    assert!(app
        .boards
        .update_task(&nope, &list, &task, TaskPatch::default())
        .is_err());
    assert!(app.boards.delete_task(&nope, &list, &task).is_err());
    assert!(app.boards.move_task(&nope, &list, &list, &task).is_err());
    assert!(app.boards.connect_github_repo(&nope, "x").is_err());

    assert_eq!(app.boards.boards(), before);
}

#[test]
fn create_task_then_delete_round_trips_the_sequence() {
    let mut app = make_app();
    let board_id = demo_board();
    let list_id = ListId::from("list-1");

    let before: Vec<TaskId> = app.boards.board(&board_id).unwrap().lists[0]
        .tasks
        .iter()
        .map(|t| t.id.clone())
        .collect();

    let task_id = app
        .create_task(&board_id, &list_id, TaskDraft::titled("Ephemeral"))
        .unwrap();
    app.boards
        .delete_task(&board_id, &list_id, &task_id)
        .unwrap();

    let after: Vec<TaskId> = app.boards.board(&board_id).unwrap().lists[0]
        .tasks
        .iter()
        .map(|t| t.id.clone())
        .collect();
    assert_eq!(before, after);
}

// ---------------------------------------------------------------------------
// Move semantics
// ---------------------------------------------------------------------------

#[test]
fn move_with_unknown_task_changes_nothing() {
    let mut app = make_app();
    let board_id = demo_board();
    let before = app.boards.boards();

    let err = app
        .boards
        .move_task(
            &board_id,
            &ListId::from("list-1"),
            &ListId::from("list-3"),
            &TaskId::from("ghost"),
        )
        .unwrap_err();

    assert!(matches!(err, BoardError::TaskNotFound(_)));
    assert_eq!(app.boards.boards(), before);
}

#[test]
fn move_with_missing_destination_keeps_the_task_in_its_source() {
    let mut app = make_app();
    let board_id = demo_board();
    let before = app.boards.boards();

    let err = app
        .boards
        .move_task(
            &board_id,
            &ListId::from("list-1"),
            &ListId::from("ghost-list"),
            &TaskId::from("task-1"),
        )
        .unwrap_err();

    assert!(matches!(err, BoardError::ListNotFound(_)));
    assert_eq!(app.boards.boards(), before);
}

#[test]
fn status_follows_each_destination_across_moves() {
    let mut app = make_app();
    let board_id = demo_board();
    let task = TaskId::from("task-1");
    let todo = ListId::from("list-1");
    let progress = ListId::from("list-2");
    let done = ListId::from("list-3");

    app.boards
        .move_task(&board_id, &todo, &progress, &task)
        .unwrap();
    let board = app.boards.board(&board_id).unwrap();
    assert_eq!(board.lists[1].tasks.last().unwrap().status, Status::InProgress);

    app.boards
        .move_task(&board_id, &progress, &done, &task)
        .unwrap();
    let board = app.boards.board(&board_id).unwrap();
    assert_eq!(board.lists[2].tasks.last().unwrap().status, Status::Done);

    // Back to the start: any state is reachable from any other.
    app.boards.move_task(&board_id, &done, &todo, &task).unwrap();
    let board = app.boards.board(&board_id).unwrap();
    assert_eq!(board.lists[0].tasks.last().unwrap().status, Status::Todo);
}

// ---------------------------------------------------------------------------
// GitHub repository label
// ---------------------------------------------------------------------------

#[test]
fn connect_github_repo_extracts_or_keeps_verbatim() {
    let mut app = make_app();
    let board_id = demo_board();

    app.boards
        .connect_github_repo(&board_id, "https://github.com/acme/widgets")
        .unwrap();
    assert_eq!(
        app.boards.board(&board_id).unwrap().github_repo,
        Some("acme/widgets".to_string())
    );

    app.boards
        .connect_github_repo(&board_id, "not-a-url")
        .unwrap();
    assert_eq!(
        app.boards.board(&board_id).unwrap().github_repo,
        Some("not-a-url".to_string())
    );
}

// ---------------------------------------------------------------------------
// Full journey
// ---------------------------------------------------------------------------

#[test]
fn full_user_journey() {
    let (mut app, _events) = App::init(&memory_config());

    // Signed out: creation is rejected.
    assert_eq!(
        app.create_board("Mine", None).unwrap_err(),
        BoardError::NotAuthenticated
    );

    app.session.signup("bob@example.com", "secret", "Bob").unwrap();

    let board_id = app.create_board("Sprint 1", None).unwrap();
    let review = app.boards.create_list(&board_id, "Review").unwrap();
    let todo = app.boards.board(&board_id).unwrap().lists[0].id.clone();

    let task_id = app
        .create_task(&board_id, &todo, TaskDraft::titled("Write tests"))
        .unwrap();
    app.boards
        .update_task(
            &board_id,
            &todo,
            &task_id,
            TaskPatch {
                description: Some("Cover the move operation".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    app.boards
        .move_task(&board_id, &todo, &review, &task_id)
        .unwrap();
    let board = app.boards.board(&board_id).unwrap();
    let review_list = board.lists.iter().find(|l| l.id == review).unwrap();
    assert_eq!(review_list.tasks[0].status, Status::Review);

    app.boards.delete_board(&board_id).unwrap();
    assert_eq!(app.boards.current_board_id(), Some(&demo_board()));

    app.session.logout();
    assert!(!app.session.is_authenticated());
}
