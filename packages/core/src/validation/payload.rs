//! Create/Update Payload Validation
//!
//! Checks the envelope fields of a page body (slug, title, metadata, and the
//! presence and shape of `components`) and extracts them. The component trees
//! themselves stay untyped in [`PagePayload::components`] until
//! [`ComponentTreeValidator`](super::ComponentTreeValidator) has accepted them;
//! only then does [`PagePayload::into_input`] produce typed nodes.

use crate::models::{CreatePageInput, PageMetadata, ValidationError, MAX_TITLE_LENGTH};
use crate::routing::SlugResolver;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

// Letters, digits, hyphens and forward slashes
const SLUG_PATTERN: &str = r"^[A-Za-z0-9/-]+$";

/// A page body whose envelope fields passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct PagePayload {
    pub slug: String,
    pub title: String,
    pub metadata: Option<PageMetadata>,
    /// Root components, not yet tree-validated
    pub components: Vec<Value>,
}

impl PagePayload {
    /// Validate and extract the envelope fields of a create/update body
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let body = body.as_object().ok_or(ValidationError::InvalidBody)?;

        let slug = match body.get("slug") {
            None | Some(Value::Null) => return Err(ValidationError::MissingField("slug".into())),
            Some(Value::String(slug)) => slug.clone(),
            Some(_) => return Err(ValidationError::invalid_field("slug", "must be a string")),
        };
        validate_slug(&slug)?;

        let title = match body.get("title") {
            None | Some(Value::Null) => return Err(ValidationError::MissingField("title".into())),
            Some(Value::String(title)) => title.clone(),
            Some(_) => return Err(ValidationError::invalid_field("title", "must be a string")),
        };
        validate_title(&title)?;

        let metadata = match body.get("metadata") {
            None => None,
            Some(Value::Object(metadata)) => Some(parse_metadata(metadata)?),
            Some(_) => return Err(ValidationError::invalid_field("metadata", "must be an object")),
        };

        let components = match body.get("components") {
            None | Some(Value::Null) => {
                return Err(ValidationError::MissingField("components".into()))
            }
            Some(Value::Array(components)) => components.clone(),
            Some(_) => {
                return Err(ValidationError::invalid_field("components", "must be an array"))
            }
        };
        if components.is_empty() {
            return Err(ValidationError::EmptyComponents);
        }

        Ok(Self {
            slug,
            title,
            metadata,
            components,
        })
    }

    /// Convert into typed input. Call only after the component trees validated.
    pub fn into_input(self) -> Result<CreatePageInput, ValidationError> {
        let components = serde_json::from_value(Value::Array(self.components))
            .map_err(|e| ValidationError::invalid_field("components", e.to_string()))?;

        Ok(CreatePageInput {
            slug: self.slug,
            title: self.title,
            metadata: self.metadata,
            components,
        })
    }
}

/// Check slug characters and that the slug can be fetched back by slug
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
    let slug_regex = SLUG_REGEX.get_or_init(|| Regex::new(SLUG_PATTERN).expect("slug pattern is valid"));

    if !slug_regex.is_match(slug) {
        return Err(ValidationError::invalid_field(
            "slug",
            "can only contain letters, numbers, hyphens, and forward slashes",
        ));
    }

    if !SlugResolver::default().is_addressable(slug) {
        return Err(ValidationError::UnaddressableSlug(slug.to_string()));
    }

    Ok(())
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::MissingField("title".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::invalid_field(
            "title",
            format!("must be {} characters or less", MAX_TITLE_LENGTH),
        ));
    }
    Ok(())
}

fn parse_metadata(metadata: &Map<String, Value>) -> Result<PageMetadata, ValidationError> {
    let description = optional_string(metadata, "description")?;
    let og_image = optional_string(metadata, "ogImage")?;

    let keywords = match metadata.get("keywords") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        ValidationError::invalid_field(
                            "metadata.keywords",
                            "must be an array of strings",
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Some(_) => {
            return Err(ValidationError::invalid_field(
                "metadata.keywords",
                "must be an array",
            ))
        }
    };

    Ok(PageMetadata {
        description,
        keywords,
        og_image,
    })
}

fn optional_string(
    metadata: &Map<String, Value>,
    field: &str,
) -> Result<Option<String>, ValidationError> {
    match metadata.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::invalid_field(
            format!("metadata.{}", field),
            "must be a string",
        )),
    }
}
