//! TursoStore - PageStore Implementation for the libsql Backend
//!
//! Wraps `DatabaseService` and delegates all SQL to its `db_*` methods. This
//! layer owns row decoding (timestamps, JSON text) and id generation, and
//! logs each statement's elapsed time at `debug` level.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pagecraft_core::db::{DatabaseService, PageStore, TursoStore};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Arc::new(DatabaseService::new(PathBuf::from("./data/pages.db")).await?);
//!     let store: Arc<dyn PageStore> = Arc::new(TursoStore::new(db));
//!
//!     let home = store.find_by_slug("home").await?;
//!     println!("found: {}", home.is_some());
//!     Ok(())
//! }
//! ```

use crate::db::page_store::{PageDraft, PageRecord, PageStore};
use crate::db::{DatabaseError, DatabaseService, DbInsertPageParams, DbUpdatePageParams};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use libsql::Row;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// TursoStore implements PageStore for the libsql backend
pub struct TursoStore {
    db: Arc<DatabaseService>,
}

/// JSON text for the storage columns of a draft
struct SerializedDraft {
    metadata: Option<String>,
    components: String,
}

impl TursoStore {
    pub fn new(db: Arc<DatabaseService>) -> Self {
        Self { db }
    }

    /// Parse timestamp from database - handles both SQLite and RFC3339 formats
    ///
    /// Column defaults produce `YYYY-MM-DD HH:MM:SS.fff`.
    fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
            return Ok(naive.and_utc());
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }

        Err(DatabaseError::invalid_row(format!(
            "Unable to parse timestamp '{}' as SQLite or RFC3339 format",
            s
        )))
    }

    /// Convert libsql::Row to PageRecord
    ///
    /// # Row Format
    ///
    /// Expected columns (in order, see `PAGE_COLUMNS`):
    /// - id (TEXT)
    /// - slug (TEXT)
    /// - title (TEXT)
    /// - metadata (TEXT JSON, nullable)
    /// - components (TEXT JSON)
    /// - created_at (TEXT)
    /// - updated_at (TEXT)
    fn row_to_record(row: &Row) -> Result<PageRecord, DatabaseError> {
        let column = |name: &str, e: libsql::Error| {
            DatabaseError::invalid_row(format!("Failed to get {}: {}", name, e))
        };

        let id: String = row.get(0).map_err(|e| column("id", e))?;
        let slug: String = row.get(1).map_err(|e| column("slug", e))?;
        let title: String = row.get(2).map_err(|e| column("title", e))?;
        let metadata_json: Option<String> = row.get(3).map_err(|e| column("metadata", e))?;
        let components_json: String = row.get(4).map_err(|e| column("components", e))?;
        let created_at_str: String = row.get(5).map_err(|e| column("created_at", e))?;
        let updated_at_str: String = row.get(6).map_err(|e| column("updated_at", e))?;

        let metadata = metadata_json
            .map(|json| serde_json::from_str::<Value>(&json))
            .transpose()
            .map_err(|e| DatabaseError::invalid_row(format!("Failed to parse metadata JSON: {}", e)))?
            .filter(|value| !value.is_null());

        let components: Value = serde_json::from_str(&components_json).map_err(|e| {
            DatabaseError::invalid_row(format!("Failed to parse components JSON: {}", e))
        })?;

        Ok(PageRecord {
            id,
            slug,
            title,
            metadata,
            components,
            created_at: Self::parse_timestamp(&created_at_str)?,
            updated_at: Self::parse_timestamp(&updated_at_str)?,
        })
    }

    fn serialize_draft(draft: &PageDraft) -> Result<SerializedDraft, DatabaseError> {
        let metadata = draft
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to serialize metadata: {}", e)))?;
        let components = serde_json::to_string(&draft.components).map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to serialize components: {}", e))
        })?;

        Ok(SerializedDraft {
            metadata,
            components,
        })
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<PageRecord>, DatabaseError> {
        self.db
            .db_get_page_by_id(id)
            .await?
            .map(|row| Self::row_to_record(&row))
            .transpose()
    }
}

#[async_trait]
impl PageStore for TursoStore {
    async fn find_all(&self) -> Result<Vec<PageRecord>, DatabaseError> {
        let started = Instant::now();
        let rows = self.db.db_list_pages().await?;
        tracing::debug!(rows = rows.len(), elapsed = ?started.elapsed(), "Executed list_pages");

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, DatabaseError> {
        let started = Instant::now();
        let row = self.db.db_get_page_by_slug(slug).await?;
        tracing::debug!(slug, found = row.is_some(), elapsed = ?started.elapsed(), "Executed get_page_by_slug");

        row.map(|row| Self::row_to_record(&row)).transpose()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PageRecord>, DatabaseError> {
        let started = Instant::now();
        let record = self.fetch_by_id(id).await?;
        tracing::debug!(id, found = record.is_some(), elapsed = ?started.elapsed(), "Executed get_page_by_id");

        Ok(record)
    }

    async fn count_with_slug(
        &self,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> Result<u64, DatabaseError> {
        let count = self.db.db_count_slug(slug, exclude_id).await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn insert(&self, draft: PageDraft) -> Result<PageRecord, DatabaseError> {
        let id = Uuid::new_v4().to_string();
        let serialized = Self::serialize_draft(&draft)?;

        let started = Instant::now();
        self.db
            .db_insert_page(DbInsertPageParams {
                id: &id,
                slug: &draft.slug,
                title: &draft.title,
                metadata: serialized.metadata.as_deref(),
                components: &serialized.components,
            })
            .await?;
        tracing::debug!(id = %id, slug = %draft.slug, elapsed = ?started.elapsed(), "Executed insert_page");

        self.fetch_by_id(&id)
            .await?
            .ok_or_else(|| DatabaseError::sql_execution(format!("Page {} not found after insert", id)))
    }

    async fn update(&self, id: &str, draft: PageDraft) -> Result<Option<PageRecord>, DatabaseError> {
        let serialized = Self::serialize_draft(&draft)?;

        let started = Instant::now();
        let changed = self
            .db
            .db_update_page(DbUpdatePageParams {
                id,
                slug: &draft.slug,
                title: &draft.title,
                metadata: serialized.metadata.as_deref(),
                components: &serialized.components,
            })
            .await?;
        tracing::debug!(id, changed, elapsed = ?started.elapsed(), "Executed update_page");

        if changed == 0 {
            return Ok(None);
        }

        self.fetch_by_id(id).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        let started = Instant::now();
        let removed = self.db.db_delete_page(id).await?;
        tracing::debug!(id, removed, elapsed = ?started.elapsed(), "Executed delete_page");

        Ok(removed > 0)
    }
}
