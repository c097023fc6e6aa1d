//! Database Connection Management
//!
//! This module provides the database connection and schema initialization
//! for Pagecraft using libsql (embedded, SQLite-compatible).
//!
//! # Architecture
//!
//! - **Path-agnostic**: Accepts any valid PathBuf
//! - **JSON columns**: `metadata` and `components` are stored as JSON text
//! - **WAL mode**: Write-Ahead Logging for better concurrency
//! - **Unique slugs**: Enforced by the `pages.slug` UNIQUE constraint, the
//!   authoritative check behind the service's advisory pre-check
//!
//! # Database Connection Patterns
//!
//! Every operation checks out its own connection with
//! `connect_with_timeout()` and drops it when done. The 5-second busy
//! timeout lets concurrent writers wait for each other instead of failing
//! with `SQLITE_BUSY`.
//!
//! ```no_run
//! # use pagecraft_core::db::DatabaseService;
//! # use std::path::PathBuf;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db_service = DatabaseService::new(PathBuf::from("./data/pages.db")).await?;
//! let conn = db_service.connect_with_timeout().await?;
//! # Ok(())
//! # }
//! ```

use crate::db::error::DatabaseError;
use libsql::{Builder, Database, Row};
use std::path::PathBuf;
use std::sync::Arc;

/// Columns selected by every page query, in `row_to_record` order
pub(crate) const PAGE_COLUMNS: &str =
    "id, slug, title, metadata, components, created_at, updated_at";

/// Millisecond-precision UTC timestamp expression
const NOW_EXPR: &str = "strftime('%Y-%m-%d %H:%M:%f', 'now')";

/// Database service for managing the libsql connection and schema
#[derive(Debug, Clone)]
pub struct DatabaseService {
    /// libsql database handle (wrapped in Arc for sharing)
    pub db: Arc<Database>,

    /// Path to the database file
    pub db_path: PathBuf,
}

/// Parameters for page insertion
pub struct DbInsertPageParams<'a> {
    pub id: &'a str,
    pub slug: &'a str,
    pub title: &'a str,
    pub metadata: Option<&'a str>,
    pub components: &'a str,
}

/// Parameters for page update
pub struct DbUpdatePageParams<'a> {
    pub id: &'a str,
    pub slug: &'a str,
    pub title: &'a str,
    pub metadata: Option<&'a str>,
    pub components: &'a str,
}

impl DatabaseService {
    /// Create a new DatabaseService with the specified database path
    ///
    /// This will:
    /// 1. Ensure the parent directory exists (create if needed)
    /// 2. Open/create the database file
    /// 3. Initialize the schema (CREATE TABLE IF NOT EXISTS)
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if:
    /// - Parent directory cannot be created
    /// - Database connection fails
    /// - Schema initialization fails
    pub async fn new(db_path: PathBuf) -> Result<Self, DatabaseError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::PermissionDenied {
                        DatabaseError::permission_denied(db_path.clone())
                    } else {
                        DatabaseError::DirectoryCreationFailed(e)
                    }
                })?;
            }
        }

        let db = Builder::new_local(&db_path)
            .build()
            .await
            .map_err(|e| DatabaseError::connection_failed(db_path.clone(), e))?;

        let service = Self {
            db: Arc::new(db),
            db_path,
        };

        service.initialize_schema().await?;

        tracing::info!("Database ready at {}", service.db_path.display());

        Ok(service)
    }

    /// Execute a PRAGMA statement
    ///
    /// PRAGMA statements return rows, so we must use query() instead of execute().
    async fn execute_pragma(
        &self,
        conn: &libsql::Connection,
        pragma: &str,
    ) -> Result<(), DatabaseError> {
        let mut stmt = conn.prepare(pragma).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        let _ = stmt.query(()).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        Ok(())
    }

    /// Initialize database schema and configuration
    ///
    /// Idempotent: safe to call on every start.
    ///
    /// # Schema
    ///
    /// - `pages` table keyed by `id`, UNIQUE on `slug`
    /// - `idx_pages_created` for the most-recent-first listing
    async fn initialize_schema(&self) -> Result<(), DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        self.execute_pragma(&conn, "PRAGMA journal_mode = WAL")
            .await?;

        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS pages (
                    id TEXT PRIMARY KEY,
                    slug TEXT NOT NULL UNIQUE,
                    title TEXT NOT NULL,
                    metadata JSON,
                    components JSON NOT NULL,
                    created_at TEXT NOT NULL DEFAULT ({now}),
                    updated_at TEXT NOT NULL DEFAULT ({now})
                )",
                now = NOW_EXPR
            ),
            (),
        )
        .await
        .map_err(|e| {
            DatabaseError::initialization_failed(format!("Failed to create pages table: {}", e))
        })?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_pages_created ON pages(created_at)",
            (),
        )
        .await
        .map_err(|e| {
            DatabaseError::initialization_failed(format!(
                "Failed to create index 'idx_pages_created': {}",
                e
            ))
        })?;

        Ok(())
    }

    /// Get a raw connection to the database
    ///
    /// Prefer `connect_with_timeout()` in async code.
    pub fn connect(&self) -> Result<libsql::Connection, DatabaseError> {
        self.db.connect().map_err(DatabaseError::LibsqlError)
    }

    /// Get a connection with busy timeout configured
    ///
    /// Sets a 5-second busy timeout so concurrent operations wait and retry
    /// instead of failing immediately when the database is locked. The
    /// connection is released when the returned handle is dropped.
    pub async fn connect_with_timeout(&self) -> Result<libsql::Connection, DatabaseError> {
        let conn = self.connect()?;

        self.execute_pragma(&conn, "PRAGMA busy_timeout = 5000")
            .await?;

        Ok(conn)
    }

    //
    // PAGE STORE OPERATIONS
    // Raw SQL only; row decoding lives in TursoStore.
    //

    /// Fetch every page row, most recently created first
    ///
    /// `rowid` breaks ties between rows created within the same millisecond.
    pub async fn db_list_pages(&self) -> Result<Vec<Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        let mut rows = conn
            .query(
                &format!(
                    "SELECT {} FROM pages ORDER BY created_at DESC, rowid DESC",
                    PAGE_COLUMNS
                ),
                (),
            )
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to execute list_pages query: {}", e))
            })?;

        let mut result = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::sql_execution(e.to_string()))?
        {
            result.push(row);
        }

        Ok(result)
    }

    /// Fetch a single page row by id
    pub async fn db_get_page_by_id(&self, id: &str) -> Result<Option<Row>, DatabaseError> {
        self.query_single_page("id", id).await
    }

    /// Fetch a single page row by slug
    pub async fn db_get_page_by_slug(&self, slug: &str) -> Result<Option<Row>, DatabaseError> {
        self.query_single_page("slug", slug).await
    }

    async fn query_single_page(
        &self,
        column: &'static str,
        value: &str,
    ) -> Result<Option<Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM pages WHERE {} = ?",
                PAGE_COLUMNS, column
            ))
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!(
                    "Failed to prepare get_page_by_{} query: {}",
                    column, e
                ))
            })?;

        let mut rows = stmt.query([value]).await.map_err(|e| {
            DatabaseError::sql_execution(format!(
                "Failed to execute get_page_by_{} query: {}",
                column, e
            ))
        })?;

        rows.next()
            .await
            .map_err(|e| DatabaseError::sql_execution(e.to_string()))
    }

    /// Count pages using `slug`, optionally ignoring one id
    pub async fn db_count_slug(
        &self,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> Result<i64, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        let mut rows = match exclude_id {
            Some(exclude_id) => {
                conn.query(
                    "SELECT COUNT(*) FROM pages WHERE slug = ? AND id != ?",
                    (slug, exclude_id),
                )
                .await
            }
            None => {
                conn.query("SELECT COUNT(*) FROM pages WHERE slug = ?", [slug])
                    .await
            }
        }
        .map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute count_slug query: {}", e))
        })?;

        let row = rows
            .next()
            .await
            .map_err(|e| DatabaseError::sql_execution(e.to_string()))?
            .ok_or_else(|| DatabaseError::sql_execution("COUNT(*) returned no row"))?;

        row.get::<i64>(0)
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to read count: {}", e)))
    }

    /// Insert a page row
    ///
    /// Timestamps are filled in by the column defaults.
    ///
    /// # Errors
    ///
    /// `DatabaseError::UniqueViolation` when the slug is already taken.
    pub async fn db_insert_page(&self, params: DbInsertPageParams<'_>) -> Result<(), DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        conn.execute(
            "INSERT INTO pages (id, slug, title, metadata, components) VALUES (?, ?, ?, ?, ?)",
            (
                params.id,
                params.slug,
                params.title,
                params.metadata,
                params.components,
            ),
        )
        .await
        .map_err(|e| DatabaseError::from_write_error("Failed to insert page", e))?;

        Ok(())
    }

    /// Replace a page row's content and refresh `updated_at`
    ///
    /// # Returns
    ///
    /// Number of rows changed (0 when the id does not exist)
    pub async fn db_update_page(&self, params: DbUpdatePageParams<'_>) -> Result<u64, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        conn.execute(
            &format!(
                "UPDATE pages SET slug = ?, title = ?, metadata = ?, components = ?, updated_at = {} WHERE id = ?",
                NOW_EXPR
            ),
            (
                params.slug,
                params.title,
                params.metadata,
                params.components,
                params.id,
            ),
        )
        .await
        .map_err(|e| DatabaseError::from_write_error("Failed to update page", e))
    }

    /// Delete a page row
    ///
    /// # Returns
    ///
    /// Number of rows removed (0 or 1)
    pub async fn db_delete_page(&self, id: &str) -> Result<u64, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        conn.execute("DELETE FROM pages WHERE id = ?", [id])
            .await
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to delete page: {}", e)))
    }
}
