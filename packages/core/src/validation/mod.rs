//! Write-Path Validation
//!
//! Pure, storage-free checks applied to create/update bodies:
//!
//! - [`PagePayload`] - slug, title, metadata and `components` shape
//! - [`ComponentTreeValidator`] - recursive structure of each component tree

mod component_tree;
mod payload;

pub use component_tree::{ComponentTreeValidator, MAX_COMPONENT_DEPTH};
pub use payload::{validate_slug, PagePayload};
