//! The session store: restore, login, signup, and logout transitions.

use taskflow_model::user::{Session, User, UserId};
use uuid::Uuid;

use super::SessionError;
use crate::storage::{SessionStorage, TOKEN_KEY, USER_KEY};

/// Owns the process-wide [`Session`] and its persistence.
///
/// The store starts in the loading state; [`restore`](Self::restore) runs
/// once at process start and resolves it to either a restored
/// authenticated session or the anonymous session. All transitions
/// replace the session wholesale, so readers always observe a complete
/// snapshot.
pub struct SessionStore {
    state: Session,
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    /// Creates a session store over the given storage backend.
    ///
    /// The session is in the loading state until [`restore`](Self::restore)
    /// is called.
    #[must_use]
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self {
            state: Session::loading(),
            storage,
        }
    }

    /// Restores a persisted session, if one exists.
    ///
    /// Requires both the token and the user entry to be present, and the
    /// user entry to parse as valid JSON. Any failure is swallowed and
    /// yields the anonymous session — restore never errors outward.
    /// Resolves `is_loading` to `false` either way.
    pub fn restore(&mut self) {
        let token = self.storage.get(TOKEN_KEY);
        let user_json = self.storage.get(USER_KEY);

        self.state = match (token, user_json) {
            (Some(token), Some(json)) => match serde_json::from_str::<User>(&json) {
                Ok(user) => {
                    tracing::info!(user = %user.id, "restored persisted session");
                    Session::authenticated(user, token)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "persisted user entry is not valid JSON; starting anonymous");
                    Session::anonymous()
                }
            },
            _ => Session::anonymous(),
        };
    }

    /// Signs in with the given credentials.
    ///
    /// Any non-empty credentials are accepted — no backend check is
    /// modeled. Synthesizes a [`User`] whose name defaults to the local
    /// part of the email, persists the session, and resolves immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingCredentials`] if the email or
    /// password is empty; state is unchanged in that case.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, SessionError> {
        if email.is_empty() || password.is_empty() {
            return Err(SessionError::MissingCredentials);
        }

        let name = email.split('@').next().unwrap_or(email).to_string();
        let user = User {
            id: UserId::new(),
            email: email.to_string(),
            name: Some(name),
        };
        self.establish(user.clone());
        Ok(user)
    }

    /// Creates an account and signs in.
    ///
    /// Same as [`login`](Self::login) but the display name is
    /// caller-supplied. Password length and confirmation checks are the
    /// caller's contract and are not enforced here.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingCredentials`] if any field is
    /// empty; state is unchanged in that case.
    pub fn signup(&mut self, email: &str, password: &str, name: &str) -> Result<User, SessionError> {
        if email.is_empty() || password.is_empty() || name.is_empty() {
            return Err(SessionError::MissingCredentials);
        }

        let user = User {
            id: UserId::new(),
            email: email.to_string(),
            name: Some(name.to_string()),
        };
        self.establish(user.clone());
        Ok(user)
    }

    /// Signs out, clearing the in-memory session and both persisted
    /// entries unconditionally. Idempotent.
    pub fn logout(&mut self) {
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(error = %e, "could not remove persisted token");
        }
        if let Err(e) = self.storage.remove(USER_KEY) {
            tracing::warn!(error = %e, "could not remove persisted user");
        }
        self.state = Session::anonymous();
        tracing::info!("signed out");
    }

    /// Returns the current session snapshot.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.state
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    /// Whether a user is currently signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    /// Mints a token, persists the session best-effort, and replaces the
    /// in-memory state. A failed write is logged and never fails the
    /// sign-in.
    fn establish(&mut self, user: User) {
        let token = format!("session-{}", Uuid::now_v7());

        match serde_json::to_string(&user) {
            Ok(json) => {
                if let Err(e) = self.storage.set(TOKEN_KEY, &token) {
                    tracing::warn!(error = %e, "could not persist session token");
                }
                if let Err(e) = self.storage.set(USER_KEY, &json) {
                    tracing::warn!(error = %e, "could not persist session user");
                }
            }
            Err(e) => tracing::warn!(error = %e, "could not encode session user"),
        }

        tracing::info!(user = %user.id, "signed in");
        self.state = Session::authenticated(user, token);
    }
}
