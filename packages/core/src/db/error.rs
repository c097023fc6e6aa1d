//! Database Error Types
//!
//! This module defines error types for database operations, providing
//! clear error handling for connection, initialization, and query failures.

use std::path::PathBuf;
use thiserror::Error;

/// Prefix SQLite puts on unique-index rejections, e.g.
/// `UNIQUE constraint failed: pages.slug`
const UNIQUE_VIOLATION_MARKER: &str = "UNIQUE constraint failed";

/// Database operation errors
///
/// Covers connection, initialization and statement failures. Unique-index
/// rejections get their own variant so callers can tell a lost race apart
/// from a broken database.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish database connection
    #[error("Failed to connect to database at {path}: {source}")]
    ConnectionFailed {
        path: PathBuf,
        source: libsql::Error,
    },

    /// Failed to initialize database schema
    #[error("Failed to initialize database schema: {0}")]
    InitializationFailed(String),

    /// Permission denied when accessing database
    #[error("Permission denied for database path: {path}")]
    PermissionDenied { path: PathBuf },

    /// Failed to create parent directory
    #[error("Failed to create parent directory for database: {0}")]
    DirectoryCreationFailed(#[from] std::io::Error),

    /// libsql operation error
    #[error("Database operation failed: {0}")]
    LibsqlError(#[from] libsql::Error),

    /// SQL execution error with context
    #[error("SQL execution failed: {context}")]
    SqlExecutionError { context: String },

    /// A write was rejected by a unique index
    #[error("Unique constraint violated on {field}")]
    UniqueViolation { field: String },

    /// A stored row could not be decoded
    #[error("Invalid row: {context}")]
    InvalidRow { context: String },
}

impl DatabaseError {
    /// Create a connection failed error
    pub fn connection_failed(path: PathBuf, source: libsql::Error) -> Self {
        Self::ConnectionFailed { path, source }
    }

    /// Create an initialization failed error
    pub fn initialization_failed(msg: impl Into<String>) -> Self {
        Self::InitializationFailed(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(path: PathBuf) -> Self {
        Self::PermissionDenied { path }
    }

    /// Create a SQL execution error with context
    pub fn sql_execution(context: impl Into<String>) -> Self {
        Self::SqlExecutionError {
            context: context.into(),
        }
    }

    /// Create a unique violation error for `field`
    pub fn unique_violation(field: impl Into<String>) -> Self {
        Self::UniqueViolation {
            field: field.into(),
        }
    }

    /// Create an invalid row error with context
    pub fn invalid_row(context: impl Into<String>) -> Self {
        Self::InvalidRow {
            context: context.into(),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }

    /// Classify a failed write: unique-index rejections become
    /// `UniqueViolation`, everything else `SqlExecutionError` with `context`.
    pub fn from_write_error(context: &str, err: libsql::Error) -> Self {
        let message = err.to_string();
        match message.find(UNIQUE_VIOLATION_MARKER) {
            Some(pos) => {
                let field = message[pos + UNIQUE_VIOLATION_MARKER.len()..]
                    .trim_start_matches(':')
                    .trim();
                Self::unique_violation(if field.is_empty() { "unknown" } else { field })
            }
            None => Self::sql_execution(format!("{}: {}", context, message)),
        }
    }
}
