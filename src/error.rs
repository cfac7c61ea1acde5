//! Error types

use thiserror::Error;

/// Failures of the durable storage slot
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("failed to read from local storage: {0}")]
    Read(String),
    #[error("failed to write to local storage: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("unknown selection category: {0}")]
    UnknownCategory(String),
    #[error("stored selections are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, SelectionError>;
