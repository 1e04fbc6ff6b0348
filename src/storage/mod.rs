//! Persistent storage
//!
//! This module maps the typed record sections onto a key-value backend and
//! handles whole-state backup export, import and reset.

pub mod backend;
pub mod backup;
pub mod collections;
pub mod sections;
pub mod store;

use std::path::PathBuf;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use backup::BackupDocument;
pub use sections::{BackupSection, Section};
pub use store::{with_default, SectionalStore};

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "COMPANION_DATA_DIR";

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// A section key holds text that does not parse as the section's shape
    #[error("Corrupt data under '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not determine the application data directory")]
    DataDir,
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Get the application data directory
///
/// `COMPANION_DATA_DIR` wins when set and non-empty; otherwise the
/// platform data directory for the app is used.
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    directories::ProjectDirs::from("com", "AICompanion", "AICompanion")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::DataDir)
}

/// Where a file-backed store keeps its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the data directory from the environment
    pub fn from_env() -> Result<Self, StorageError> {
        Ok(Self::new(get_data_dir()?))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        match Self::from_env() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to resolve data directory, using ./data: {}", e);
                Self::new("./data")
            }
        }
    }
}
