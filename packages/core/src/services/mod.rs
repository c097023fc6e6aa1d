//! Business Services
//!
//! This module contains the page business logic:
//!
//! - `PageService` - CRUD operations, slug uniqueness and validation
//! - `PageRepository` - typed adapter between pages and the storage contract
//!
//! Services coordinate between the database layer and the HTTP surface and
//! report every failure as a [`PageServiceError`].

pub mod error;
pub mod page_repository;
pub mod page_service;

pub use error::PageServiceError;
pub use page_repository::PageRepository;
pub use page_service::PageService;
