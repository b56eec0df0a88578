//! User identity and session state types for `TaskFlow`.
//!
//! A [`User`] is synthesized locally on login or signup — no server-side
//! validation is modeled. The [`Session`] struct is the process-wide
//! authentication state, owned by the session store and replaced wholesale
//! on every transition.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user.
///
/// Wraps an opaque string. Generated ids are UUID v7 for time-ordering;
/// fixed string ids (seed data such as `system`) are equally valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new time-ordered user identifier (UUID v7).
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

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A locally synthesized user identity.
///
/// Immutable once created; its lifetime is the session. The JSON shape of
/// this struct is the persisted `user` storage entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Email address the user signed in with.
    pub email: String,
    /// Display name. Login defaults it to the local part of the email;
    /// signup takes it from the caller.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

/// Process-wide session state.
///
/// Lifecycle: starts as [`Session::loading`] while a prior session is
/// restored from storage, then resolves to either a restored
/// authenticated session or [`Session::anonymous`]. Login and signup
/// replace all fields at once; logout clears them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The signed-in user, if any.
    pub user: Option<User>,
    /// Opaque bearer token for the signed-in user, if any.
    pub token: Option<String>,
    /// Whether a user is currently signed in.
    pub is_authenticated: bool,
    /// Whether session restore is still pending. Set exactly once, at
    /// process start; drops to `false` when restore resolves either way.
    pub is_loading: bool,
}

impl Session {
    /// The startup state: anonymous, with restore still pending.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            user: None,
            token: None,
            is_authenticated: false,
            is_loading: true,
        }
    }

    /// The resolved anonymous state.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            token: None,
            is_authenticated: false,
            is_loading: false,
        }
    }

    /// An authenticated session for the given user and token.
    #[must_use]
    pub const fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            is_loading: false,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}
