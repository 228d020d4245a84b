// src/error.rs

//! Central error type for depyard operations
//!
//! Covers the index, cache, and resolution paths. Declaration parsing
//! keeps its own richer [`crate::manifest::ManifestError`]; callers
//! that need both unify them at the application level.

use thiserror::Error;

/// Errors surfaced by depyard's library operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Download error: {0}")]
    DownloadError(String),

    #[error("Initialization error: {0}")]
    InitError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Snapshot checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

/// Result type for depyard operations
pub type Result<T> = std::result::Result<T, Error>;
