//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading a heap snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read heap snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse heap snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported snapshot format version {found} (this build reads version {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("malformed heap snapshot: {0}")]
    Malformed(String),
}

/// Errors raised when a report is requested with invalid arguments
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("row count must be greater than zero")]
    ZeroRows,

    #[error("type name filter must not be empty")]
    EmptyFilter,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
