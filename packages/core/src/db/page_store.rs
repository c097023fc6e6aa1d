//! PageStore Trait - Persistence Contract
//!
//! The narrow read/write contract the service layer needs from durable
//! storage. Implementations deal in [`PageRecord`] rows whose `metadata` and
//! `components` are schema-less JSON payloads; typing them is the
//! repository's job.
//!
//! # Contract
//!
//! - `find_all` orders by creation time, most recent first
//! - `insert` assigns id and timestamps, and fails with
//!   [`DatabaseError::UniqueViolation`] when the slug is already taken,
//!   however the race that let the write through came about
//! - `update` returns `None` when the id does not exist
//! - `delete` returns `true` iff a row was removed
//! - JSON payloads keep nested structure and key order through a round-trip
//!
//! # Thread Safety
//!
//! Implementations must be `Send + Sync`; one store instance is shared by
//! every request.

use crate::db::DatabaseError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A persisted page row
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub metadata: Option<Value>,
    pub components: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row content supplied by the caller; id and timestamps belong to the store
#[derive(Debug, Clone, PartialEq)]
pub struct PageDraft {
    pub slug: String,
    pub title: String,
    pub metadata: Option<Value>,
    pub components: Value,
}

/// Abstraction layer for page persistence operations
#[async_trait]
pub trait PageStore: Send + Sync {
    /// All pages, most recently created first
    async fn find_all(&self) -> Result<Vec<PageRecord>, DatabaseError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, DatabaseError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<PageRecord>, DatabaseError>;

    /// Number of pages using `slug`, ignoring `exclude_id` when given
    async fn count_with_slug(
        &self,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> Result<u64, DatabaseError>;

    /// Insert a new page, assigning its id and timestamps
    ///
    /// # Errors
    ///
    /// [`DatabaseError::UniqueViolation`] if the slug is already in use.
    async fn insert(&self, draft: PageDraft) -> Result<PageRecord, DatabaseError>;

    /// Replace a page's content; `Ok(None)` when `id` does not exist
    ///
    /// # Errors
    ///
    /// [`DatabaseError::UniqueViolation`] if the new slug belongs to another page.
    async fn update(&self, id: &str, draft: PageDraft) -> Result<Option<PageRecord>, DatabaseError>;

    /// Remove a page; `Ok(true)` iff a row was removed
    async fn delete(&self, id: &str) -> Result<bool, DatabaseError>;
}
