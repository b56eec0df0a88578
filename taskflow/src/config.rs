//! Configuration for embedding `TaskFlow`.
//!
//! Layered with the following priority (highest first):
//! 1. TOML config file (explicit path, or `~/.config/taskflow/config.toml`)
//! 2. Compiled defaults
//!
//! A missing file at the default path is not an error (defaults are
//! used). An explicit path that doesn't exist is an error.

use std::path::PathBuf;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

/// Which session storage backend to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// In-memory storage; the session does not survive the process.
    Memory,
    /// Write-through JSON file storage.
    File,
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    seed: SeedFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    kind: Option<StorageKind>,
    path: Option<PathBuf>,
}

/// `[seed]` section of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SeedFileConfig {
    demo_board: Option<bool>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Session storage backend to use.
    pub storage: StorageKind,
    /// Session file path; `None` means the platform default
    /// (`<data_dir>/taskflow/session.json`).
    pub storage_path: Option<PathBuf>,
    /// Whether to seed the "Getting Started" demo board at startup.
    pub seed_demo_board: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::File,
            storage_path: None,
            seed_demo_board: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit config file cannot be read
    /// or any file cannot be parsed.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        let file = load_config_file(explicit_path)?;
        Ok(Self::resolve(&file))
    }

    /// Resolve an `AppConfig` from a parsed config file over defaults.
    #[must_use]
    fn resolve(file: &ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            storage: file.storage.kind.unwrap_or(defaults.storage),
            storage_path: file.storage.path.clone().or(defaults.storage_path),
            seed_demo_board: file.seed.demo_board.unwrap_or(defaults.seed_demo_board),
        }
    }
}

/// Load and parse a TOML config file.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskflow").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
