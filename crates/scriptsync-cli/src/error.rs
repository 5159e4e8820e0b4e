//! Error types for scriptsync-cli

use scriptsync_core::{Error, TransportError};

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from scriptsync-core
    #[error(transparent)]
    Core(#[from] Error),

    /// Remote call made directly by a command
    #[error("Remote call failed: {0}")]
    Remote(#[from] TransportError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Extra lines shown under the error message.
    ///
    /// A failed push lists the files it tried to send, and remote
    /// rejections list their per-file messages.
    pub fn details(&self) -> Vec<String> {
        let (attempted, transport) = match self {
            Self::Core(Error::PushFailed { attempted, source }) => {
                (attempted.as_slice(), Some(source))
            }
            Self::Core(Error::Transport(source)) | Self::Remote(source) => (&[][..], Some(source)),
            _ => (&[][..], None),
        };

        let mut lines = Vec::new();
        if !attempted.is_empty() {
            lines.push("Attempted files:".to_string());
            lines.extend(attempted.iter().map(|name| format!("  {}", name)));
        }
        for file_error in transport.map(|t| t.file_errors.as_slice()).unwrap_or_default() {
            match &file_error.name {
                Some(name) => lines.push(format!("  {}: {}", name, file_error.message)),
                None => lines.push(format!("  {}", file_error.message)),
            }
        }
        lines
    }
}
