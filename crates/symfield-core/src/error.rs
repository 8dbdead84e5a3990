//! Error types for symfield-core

use std::path::PathBuf;

/// Result type for symfield-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in symfield-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A block opened but its parentheses never balanced
    #[error("Unbalanced '{field}' block starting at line {line} in {path}")]
    UnbalancedBlock {
        path: PathBuf,
        field: String,
        line: usize,
    },

    /// Filesystem error from symfield-fs
    #[error(transparent)]
    Fs(#[from] symfield_fs::Error),

    /// Scanner error from symfield-blocks
    #[error(transparent)]
    Blocks(#[from] symfield_blocks::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
