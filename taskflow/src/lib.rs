//! `TaskFlow` — in-memory kanban board and session state engine.
//!
//! Two cooperating state containers form the logical core:
//!
//! - [`session::SessionStore`] owns identity: the current user, the
//!   authentication flag, and the login/signup/logout transitions. It is
//!   a leaf — nothing else depends on it except to stamp ownership on
//!   newly created entities.
//! - [`board::BoardStore`] owns the domain aggregate (boards → lists →
//!   tasks) and every mutation over it, including the task-move operation
//!   that re-derives a task's status from its destination list.
//!
//! Both stores are explicitly constructed state holders, wired together
//! by [`app::App`] and passed by reference to the embedding UI layer.
//! Every mutation runs to completion synchronously; an operation either
//! fully applies or leaves the state untouched.

pub mod app;
pub mod board;
pub mod config;
pub mod session;
pub mod storage;
