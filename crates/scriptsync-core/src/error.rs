//! Error types for scriptsync-core

use std::path::PathBuf;

use scriptsync_fs::NormalizedPath;

use crate::files::FileType;
use crate::remote::TransportError;

/// Result type for scriptsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in scriptsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Ignore file or project config present but unreadable or malformed
    #[error("Invalid configuration in {origin}: {message}")]
    Config { origin: String, message: String },

    /// No project config at or above the starting directory
    #[error("Configuration not found at or above {path}")]
    ConfigNotFound { path: PathBuf },

    /// Two local files reduce to the same remote name
    #[error("Conflicting files for remote name '{basename}': {}", join_paths(.paths))]
    FileConflict {
        basename: String,
        paths: Vec<NormalizedPath>,
    },

    /// A remote file's type has no configured extension
    #[error("No file extension configured for {file_type} file '{name}'")]
    UnknownType { name: String, file_type: FileType },

    /// A remote name that would not map to a path inside the content root
    #[error("Remote file name '{name}' cannot be mapped to a local path")]
    InvalidRemoteName { name: String },

    /// Remote call failed
    #[error("Remote call failed: {0}")]
    Transport(#[from] TransportError),

    /// Whole-set replace was rejected; carries the attempted payload names
    #[error("Push of {} file(s) failed: {source}", .attempted.len())]
    PushFailed {
        attempted: Vec<String>,
        source: TransportError,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from scriptsync-fs
    #[error(transparent)]
    Fs(#[from] scriptsync_fs::Error),

    /// Directory traversal error
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// Filesystem watcher error
    #[error(transparent)]
    Watch(#[from] notify::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error attributed to `origin`.
    pub fn config(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

fn join_paths(paths: &[NormalizedPath]) -> String {
    paths
        .iter()
        .map(NormalizedPath::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
