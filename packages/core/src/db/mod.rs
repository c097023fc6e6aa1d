//! Database Layer
//!
//! This module handles all persistence for pages:
//!
//! - [`PageStore`] - the narrow read/write contract the service layer uses
//! - [`DatabaseService`] - libsql connection, schema and raw SQL
//! - [`TursoStore`] - `PageStore` over `DatabaseService` (row decoding, ids)
//! - [`MemoryStore`] - `PageStore` kept in process memory, for tests
//!
//! # Architecture
//!
//! Pagecraft stores one `pages` table in an embedded libsql database.
//! `metadata` and `components` are schema-less JSON columns; the UNIQUE index
//! on `slug` is the authoritative guard for slug uniqueness.

mod database;
mod error;
mod memory_store;
mod page_store;
mod turso_store;

pub use database::{DatabaseService, DbInsertPageParams, DbUpdatePageParams};
pub use error::DatabaseError;
pub use memory_store::MemoryStore;
pub use page_store::{PageDraft, PageRecord, PageStore};
pub use turso_store::TursoStore;
