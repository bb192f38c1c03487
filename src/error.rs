//! Error types for tracker operations

use thiserror::Error;

/// Errors that can occur while mutating or restoring tracker state
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Chapter id is not part of the catalog
    #[error("Unknown chapter {0}")]
    UnknownChapter(u32),

    /// Import document could not be understood
    #[error("Invalid import file: {0}")]
    InvalidImport(String),

    /// `confirm` was called with no pending action
    #[error("Nothing is waiting for confirmation")]
    NothingToConfirm,

    /// Reading or writing a user-selected file failed
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrackerError {
    /// Check if the user can simply retry or pick another input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TrackerError::InvalidImport(_) | TrackerError::Io(_) | TrackerError::Json(_)
        )
    }
}
