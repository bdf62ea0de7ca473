//! Error types for the backup store core library.

use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the backup store library.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A create-only operation targeted a key that already holds an archive
    #[error("Backup file already exists: {0}")]
    BackupFileExists(String),

    /// A download did not complete. Carries the caller-supplied message or a
    /// generic default, never raw backend detail.
    #[error("{0}")]
    DownloadFailed(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Object not found
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Storage backend error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Listing the namespace failed. Deliberately a bare kind: the underlying
    /// backend error is logged where it is collapsed, not carried here.
    #[error("Failed to list backup files")]
    ListFailed,
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}
