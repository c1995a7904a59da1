use rusqlite;
use std::io;
use thiserror::Error;

/// Failures inside the storage layer. These never cross the `History`
/// boundary; the repository collapses them into boolean/absent results.
#[derive(Error, Debug)]
pub enum ReattachError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Store operation denied: {0}")]
    Denied(String),
}
