//! Property tests for the board store's ownership invariants.
//!
//! Drives the store with random operation sequences (including
//! deliberately dangling ids) and checks after every step that each task
//! belongs to exactly one list, each list to exactly one board, and that
//! a move never drops a task — the failure mode the up-front destination
//! check exists to prevent.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashSet;

use proptest::prelude::*;
use taskflow::board::BoardStore;
use taskflow_model::board::{Board, BoardId, List, ListId};
use taskflow_model::task::{Task, TaskDraft, TaskId};
use taskflow_model::user::{User, UserId};

/// List titles covering every derivation keyword plus a neutral one.
const LIST_TITLES: [&str; 5] = ["Backlog", "To Do", "In Progress", "Review", "Done"];

/// One randomly targeted store operation. Indices address existing
/// entities modulo collection size; on an empty collection the op runs
/// against a fabricated id and must be a clean no-op.
#[derive(Debug, Clone)]
enum Op {
    CreateBoard,
    CreateList { board: u8, title: u8 },
    CreateTask { board: u8, list: u8 },
    MoveTask { board: u8, from: u8, to: u8, task: u8 },
    RenameList { board: u8, list: u8, title: u8 },
    DeleteTask { board: u8, list: u8, task: u8 },
    DeleteList { board: u8, list: u8 },
    DeleteBoard { board: u8 },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::CreateBoard),
        2 => (any::<u8>(), any::<u8>())
            .prop_map(|(board, title)| Op::CreateList { board, title }),
        4 => (any::<u8>(), any::<u8>())
            .prop_map(|(board, list)| Op::CreateTask { board, list }),
        5 => (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(board, from, to, task)| Op::MoveTask { board, from, to, task }),
        2 => (any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(board, list, title)| Op::RenameList { board, list, title }),
        2 => (any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(board, list, task)| Op::DeleteTask { board, list, task }),
        1 => (any::<u8>(), any::<u8>())
            .prop_map(|(board, list)| Op::DeleteList { board, list }),
        1 => any::<u8>().prop_map(|board| Op::DeleteBoard { board }),
    ]
}

fn board_at(boards: &[Board], i: u8) -> Option<&Board> {
    if boards.is_empty() {
        None
    } else {
        boards.get(usize::from(i) % boards.len())
    }
}

fn list_at(board: &Board, i: u8) -> Option<&List> {
    if board.lists.is_empty() {
        None
    } else {
        board.lists.get(usize::from(i) % board.lists.len())
    }
}

fn task_at(list: &List, i: u8) -> Option<&Task> {
    if list.tasks.is_empty() {
        None
    } else {
        list.tasks.get(usize::from(i) % list.tasks.len())
    }
}

fn title_at(i: u8) -> &'static str {
    LIST_TITLES[usize::from(i) % LIST_TITLES.len()]
}

fn total_tasks(store: &BoardStore) -> usize {
    store
        .boards()
        .iter()
        .map(|b| b.lists.iter().map(|l| l.tasks.len()).sum::<usize>())
        .sum()
}

fn apply(store: &mut BoardStore, user: &User, op: &Op) {
    let boards = store.boards();
    match op {
        Op::CreateBoard => {
            let _ = store.create_board(Some(user), "Board", None);
        }
        Op::CreateList { board, title } => {
            let board_id = board_at(&boards, *board)
                .map_or_else(|| BoardId::from("missing"), |b| b.id.clone());
            let _ = store.create_list(&board_id, title_at(*title));
        }
        Op::CreateTask { board, list } => {
            let (board_id, list_id) = board_at(&boards, *board).map_or_else(
                || (BoardId::from("missing"), ListId::from("missing")),
                |b| {
                    let list_id = list_at(b, *list)
                        .map_or_else(|| ListId::from("missing"), |l| l.id.clone());
                    (b.id.clone(), list_id)
                },
            );
            let _ = store.create_task(Some(user), &board_id, &list_id, TaskDraft::titled("Task"));
        }
        Op::MoveTask {
            board,
            from,
            to,
            task,
        } => {
            let (board_id, from_id, to_id, task_id) = board_at(&boards, *board).map_or_else(
                || {
                    (
                        BoardId::from("missing"),
                        ListId::from("missing"),
                        ListId::from("missing"),
                        TaskId::from("missing"),
                    )
                },
                |b| {
                    let from_list = list_at(b, *from);
                    let from_id = from_list
                        .map_or_else(|| ListId::from("missing"), |l| l.id.clone());
                    let to_id = list_at(b, *to)
                        .map_or_else(|| ListId::from("missing"), |l| l.id.clone());
                    let task_id = from_list
                        .and_then(|l| task_at(l, *task))
                        .map_or_else(|| TaskId::from("missing"), |t| t.id.clone());
                    (b.id.clone(), from_id, to_id, task_id)
                },
            );
            let before = total_tasks(store);
            let _ = store.move_task(&board_id, &from_id, &to_id, &task_id);
            assert_eq!(
                total_tasks(store),
                before,
                "a move must never change the total task count"
            );
        }
        Op::RenameList { board, list, title } => {
            let (board_id, list_id) = board_at(&boards, *board).map_or_else(
                || (BoardId::from("missing"), ListId::from("missing")),
                |b| {
                    let list_id = list_at(b, *list)
                        .map_or_else(|| ListId::from("missing"), |l| l.id.clone());
                    (b.id.clone(), list_id)
                },
            );
            let _ = store.update_list(&board_id, &list_id, title_at(*title));
        }
        Op::DeleteTask { board, list, task } => {
            let (board_id, list_id, task_id) = board_at(&boards, *board).map_or_else(
                || {
                    (
                        BoardId::from("missing"),
                        ListId::from("missing"),
                        TaskId::from("missing"),
                    )
                },
                |b| {
                    let target_list = list_at(b, *list);
                    let list_id = target_list
                        .map_or_else(|| ListId::from("missing"), |l| l.id.clone());
                    let task_id = target_list
                        .and_then(|l| task_at(l, *task))
                        .map_or_else(|| TaskId::from("missing"), |t| t.id.clone());
                    (b.id.clone(), list_id, task_id)
                },
            );
            let _ = store.delete_task(&board_id, &list_id, &task_id);
        }
        Op::DeleteList { board, list } => {
            let (board_id, list_id) = board_at(&boards, *board).map_or_else(
                || (BoardId::from("missing"), ListId::from("missing")),
                |b| {
                    let list_id = list_at(b, *list)
                        .map_or_else(|| ListId::from("missing"), |l| l.id.clone());
                    (b.id.clone(), list_id)
                },
            );
            let _ = store.delete_list(&board_id, &list_id);
        }
        Op::DeleteBoard { board } => {
            let board_id = board_at(&boards, *board)
                .map_or_else(|| BoardId::from("missing"), |b| b.id.clone());
            let _ = store.delete_board(&board_id);
        }
    }
}

/// Each list appears under exactly one board and each task under exactly
/// one list; the current board, when set, exists.
fn assert_ownership_invariants(store: &BoardStore) {
    let boards = store.boards();

    let mut board_ids = HashSet::new();
    let mut list_ids = HashSet::new();
    let mut task_ids = HashSet::new();
    for board in &boards {
        assert!(board_ids.insert(board.id.clone()), "duplicate board id");
        for list in &board.lists {
            assert!(list_ids.insert(list.id.clone()), "list owned twice");
            for task in &list.tasks {
                assert!(task_ids.insert(task.id.clone()), "task owned twice");
            }
        }
    }

    if let Some(current) = store.current_board_id() {
        assert!(
            board_ids.contains(current),
            "current board must exist in the store"
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_operation_sequences_preserve_ownership(
        ops in prop::collection::vec(arb_op(), 0..40)
    ) {
        let (mut store, _events) = BoardStore::new();
        let user = User {
            id: UserId::from("prop-user"),
            email: "prop@example.com".to_string(),
            name: None,
        };

        for op in &ops {
            apply(&mut store, &user, op);
            assert_ownership_invariants(&store);
        }
    }
}
