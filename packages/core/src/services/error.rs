//! Service Layer Error Types
//!
//! One variant per outcome a caller can observe, regardless of which layer
//! detected it. In particular a slug collision is always `Conflict`, whether
//! the advisory pre-check or the storage constraint caught it.

use crate::db::DatabaseError;
use crate::models::ValidationError;
use thiserror::Error;

/// Page service operation errors
#[derive(Error, Debug)]
pub enum PageServiceError {
    /// No page with the given slug or id
    #[error("Page not found")]
    NotFound,

    /// Slug already owned by another page
    #[error("A page with this slug already exists")]
    Conflict { slug: String },

    /// Create/update body or component tree is malformed
    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Identifier is not in the format storage assigns
    #[error("Invalid page id format")]
    MalformedIdentifier { id: String },

    /// Storage failure; not user-correctable
    #[error("Database operation failed: {0}")]
    DatabaseError(#[from] DatabaseError),
}

impl PageServiceError {
    /// Create a conflict error for `slug`
    pub fn conflict(slug: impl Into<String>) -> Self {
        Self::Conflict { slug: slug.into() }
    }

    /// Create a malformed identifier error
    pub fn malformed_identifier(id: impl Into<String>) -> Self {
        Self::MalformedIdentifier { id: id.into() }
    }

    /// Whether the failure is on the server side rather than in the request
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::DatabaseError(_))
    }
}
