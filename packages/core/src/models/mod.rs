//! Data Models
//!
//! This module contains the data structures used throughout Pagecraft:
//!
//! - `Page` - The addressable content unit, keyed by id and by slug
//! - `ComponentNode` - A typed node in a page's content tree
//! - `ValidationError` - Everything that can be wrong with a client payload

mod component;
mod page;

pub use component::{ComponentNode, ComponentType};
pub use page::{
    is_valid_page_id, CreatePageInput, Page, PageMetadata, UpdatePageInput, ValidationError,
    MAX_TITLE_LENGTH,
};
