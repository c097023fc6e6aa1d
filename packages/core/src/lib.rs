//! Pagecraft Core Business Logic Layer
//!
//! This crate provides content storage for the Pagecraft page builder: pages
//! made of nested UI components, addressed by hierarchical slugs.
//!
//! # Architecture
//!
//! - **Closed component vocabulary**: Seven component types, nested at most ten levels
//! - **Schema-less storage**: `metadata` and `components` stored as JSON text
//! - **libsql/Turso**: Embedded SQLite-compatible database
//! - **Storage-enforced uniqueness**: The UNIQUE index on `slug` decides races
//!
//! # Modules
//!
//! - [`models`] - Data structures (Page, ComponentNode, ValidationError)
//! - [`routing`] - Slug resolution for the pages namespace
//! - [`validation`] - Payload and component tree validation
//! - [`db`] - Database layer with libsql integration
//! - [`services`] - Business services (PageService)

pub mod db;
pub mod models;
pub mod routing;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use models::*;
pub use routing::{PageIntent, SlugResolver, PAGES_NAMESPACE};
pub use services::*;
pub use validation::{ComponentTreeValidator, MAX_COMPONENT_DEPTH};
