//! Page Data Structures
//!
//! A `Page` is the addressable content unit: a unique slug, a title, optional
//! descriptive metadata and a non-empty component tree. Identifiers and
//! timestamps are assigned by storage and never accepted from clients.
//!
//! # Examples
//!
//! ```rust
//! use pagecraft_core::models::{ComponentNode, ComponentType, CreatePageInput};
//!
//! let input = CreatePageInput {
//!     slug: "news/technology".to_string(),
//!     title: "Technology".to_string(),
//!     metadata: None,
//!     components: vec![ComponentNode::new(ComponentType::Hero, "hero-1", Default::default())],
//! };
//! assert_eq!(input.components.len(), 1);
//! ```

use crate::models::ComponentNode;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Maximum title length, counted in characters
pub const MAX_TITLE_LENGTH: usize = 255;

// Canonical hyphenated UUID, either case
const PAGE_ID_PATTERN: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

/// Validation errors for page payloads and component trees
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Component nesting too deep (max {max} levels)")]
    NestingTooDeep { max: usize },

    #[error("Component is missing")]
    MissingNode,

    #[error("Component type is missing")]
    MissingType,

    #[error("Invalid component type: {0}")]
    InvalidType(String),

    #[error("Component id is missing or not a string")]
    MissingId,

    #[error("Component props is missing or not an object")]
    MissingProps,

    #[error("Component children must be an array")]
    ChildrenNotSequence,

    #[error("{0} is required")]
    MissingField(String),

    #[error("{field} {reason}")]
    InvalidField { field: String, reason: String },

    #[error("components array cannot be empty")]
    EmptyComponents,

    #[error("slug '{0}' is reserved or cannot be addressed")]
    UnaddressableSlug(String),

    #[error("Request body must be a JSON object")]
    InvalidBody,
}

impl ValidationError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Optional descriptive metadata; absent fields stay absent on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

/// A stored page, as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
    pub components: Vec<ComponentNode>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied page content for create and update.
///
/// Built from a request body only after it passed payload and component
/// tree validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageInput {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
    pub components: Vec<ComponentNode>,
}

/// Updates replace the whole page content, so they share the create shape
pub type UpdatePageInput = CreatePageInput;

/// Check whether `id` has the identifier format storage assigns
///
/// # Examples
///
/// ```
/// # use pagecraft_core::models::is_valid_page_id;
/// assert!(is_valid_page_id("550e8400-e29b-41d4-a716-446655440000"));
/// assert!(is_valid_page_id("550E8400-E29B-41D4-A716-446655440000"));
/// assert!(!is_valid_page_id("home"));
/// ```
pub fn is_valid_page_id(id: &str) -> bool {
    static PAGE_ID_REGEX: OnceLock<Regex> = OnceLock::new();
    PAGE_ID_REGEX
        .get_or_init(|| Regex::new(PAGE_ID_PATTERN).expect("page id pattern is valid"))
        .is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComponentType;
    use serde_json::json;

    #[test]
    fn page_serializes_camel_case_and_omits_missing_metadata() {
        let now = Utc::now();
        let page = Page {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            slug: "home".to_string(),
            title: "Home".to_string(),
            metadata: None,
            components: vec![ComponentNode::new(ComponentType::Hero, "hero-1", Default::default())],
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&page).unwrap();
        assert!(value.get("metadata").is_none());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["components"][0]["type"], "Hero");
    }

    #[test]
    fn metadata_omits_absent_fields() {
        let metadata = PageMetadata {
            description: Some("Front page".to_string()),
            keywords: None,
            og_image: Some("https://example.com/og.jpg".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&metadata).unwrap(),
            json!({ "description": "Front page", "ogImage": "https://example.com/og.jpg" })
        );
    }

    #[test]
    fn page_id_format() {
        assert!(is_valid_page_id("00000000-0000-0000-0000-000000000000"));
        assert!(!is_valid_page_id(""));
        assert!(!is_valid_page_id("550e8400e29b41d4a716446655440000"));
        assert!(!is_valid_page_id("550e8400-e29b-41d4-a716-44665544000g"));
        assert!(!is_valid_page_id("news/technology"));
    }
}
