//! Opaque key-value storage for the persisted session.
//!
//! The session store persists exactly two string entries: the bearer
//! token under [`TOKEN_KEY`] and the JSON-serialized user under
//! [`USER_KEY`]. Board state is never persisted. The [`SessionStorage`]
//! trait is the seam the session store is generic over; implementations
//! are an in-memory map and a write-through JSON file.

use std::collections::HashMap;
use std::path::PathBuf;

/// Storage key for the opaque session token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the JSON-serialized user.
pub const USER_KEY: &str = "user";

/// Errors that can occur in a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to write the storage file.
    #[error("failed to write storage file {path}: {source}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to encode the storage contents as JSON.
    #[error("failed to encode storage contents: {0}")]
    Encode(#[from] serde_json::Error),

    /// Could not determine the user's data directory.
    #[error("could not determine data directory (no HOME or XDG_DATA_HOME)")]
    NoDataDir,
}

/// Opaque string key-value storage for session state.
///
/// Reads are infallible (a missing or unreadable entry is simply absent);
/// writes can fail, and callers treat persistence as best-effort.
pub trait SessionStorage {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot persist the entry.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the entry under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot persist the removal.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates a new, empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Write-through storage backed by a single JSON object file.
///
/// The file is loaded eagerly on open; an unreadable or corrupt file
/// degrades to an empty map with a warning, so a damaged session file
/// yields an anonymous session rather than an error.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    /// Opens (or initializes) storage at the given path.
    ///
    /// Missing files are treated as empty storage. Read and parse
    /// failures are logged and also treated as empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "session file is not valid JSON; starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read session file; starting empty");
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    /// The default storage path: `<data_dir>/taskflow/session.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoDataDir`] if the platform data directory
    /// cannot be determined.
    pub fn default_path() -> Result<PathBuf, StorageError> {
        dirs::data_dir()
            .map(|d| d.join("taskflow").join("session.json"))
            .ok_or(StorageError::NoDataDir)
    }

    /// Returns the path this storage writes to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::WriteFile {
                path: self.path.clone(),
                source: e,
            })?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, contents).map_err(|e| StorageError::WriteFile {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}
