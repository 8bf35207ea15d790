use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Invalid command line arguments: {0}")]
    InvalidArguments(String),

    #[error("No locale files found under {0:?}")]
    NoLocaleFiles(PathBuf),

    #[error("No source files found under {0:?}")]
    NoSourceFiles(PathBuf),

    #[error("Pattern configuration error: {0}")]
    PatternConfig(String),

    #[error("Backup creation failed: {0}")]
    BackupFailed(String),

    #[error("Stale edit: {file:?}:{line} no longer contains \"{text}\"")]
    StaleEdit {
        file: PathBuf,
        line: usize,
        text: String,
    },

    #[error("Line {line} out of bounds for {file:?} ({len} lines)")]
    LineOutOfBounds {
        file: PathBuf,
        line: usize,
        len: usize,
    },

    #[error("Key already exists: {0}")]
    KeyAlreadyExists(String),

    #[error("Watch error: {0}")]
    WatchError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
