//! Session state management for `TaskFlow`.
//!
//! Owns the current user identity and its persisted credential token.
//! Identity is synthesized locally — login and signup accept any
//! non-empty credentials and resolve immediately, mirroring a future
//! backend call without modeling one.

pub mod store;

pub use store::SessionStore;

use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Login or signup was attempted with an empty field.
    #[error("email, password, and name must not be empty")]
    MissingCredentials,
}
