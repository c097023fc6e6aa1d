//! Page Service - Page CRUD Business Logic
//!
//! This module owns the rules that sit between the HTTP surface and storage:
//!
//! - Payload validation (slug, title, metadata, component trees)
//! - Slug uniqueness, reported as `Conflict`
//! - Identifier format checks, reported as `MalformedIdentifier`
//! - Not-found semantics for reads, updates and deletes
//!
//! # Slug Uniqueness
//!
//! Writes first ask the store whether the slug is taken so the common case
//! fails fast with a clean `Conflict`. That check is advisory only: two
//! concurrent creates can both pass it. The UNIQUE constraint in storage is
//! what actually decides, and its rejection is translated to the same
//! `Conflict`, so at most one of the racing writers succeeds.
//!
//! # Validation Order
//!
//! Create and update check, in order: the body envelope (slug, title,
//! metadata, presence of `components`), then slug availability, then each
//! component tree. A duplicate slug with an invalid tree therefore reports
//! `Conflict`.

use crate::db::{DatabaseError, PageStore};
use crate::models::{is_valid_page_id, Page};
use crate::services::error::PageServiceError;
use crate::services::page_repository::PageRepository;
use crate::validation::{ComponentTreeValidator, PagePayload};
use serde_json::Value;
use std::sync::Arc;

/// Page CRUD operations over any [`PageStore`]
///
/// # Examples
///
/// ```no_run
/// # use pagecraft_core::db::{DatabaseService, TursoStore};
/// # use pagecraft_core::services::PageService;
/// # use serde_json::json;
/// # use std::path::PathBuf;
/// # use std::sync::Arc;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Arc::new(DatabaseService::new(PathBuf::from("./pages.db")).await?);
/// let service = PageService::new(Arc::new(TursoStore::new(db)));
///
/// let page = service
///     .create_page(&json!({
///         "slug": "about",
///         "title": "About",
///         "components": [{ "type": "Text", "id": "intro", "props": { "content": "Hi" } }]
///     }))
///     .await?;
/// assert_eq!(service.get_page_by_slug("about").await?.id, page.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PageService {
    repository: PageRepository,
    validator: ComponentTreeValidator,
}

impl PageService {
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self {
            repository: PageRepository::new(store),
            validator: ComponentTreeValidator::new(),
        }
    }

    /// Use a non-default component tree validator
    pub fn with_validator(mut self, validator: ComponentTreeValidator) -> Self {
        self.validator = validator;
        self
    }

    /// All pages, most recently created first. Empty store yields an empty list.
    pub async fn get_all_pages(&self) -> Result<Vec<Page>, PageServiceError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn get_page_by_slug(&self, slug: &str) -> Result<Page, PageServiceError> {
        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or(PageServiceError::NotFound)
    }

    pub async fn get_page_by_id(&self, id: &str) -> Result<Page, PageServiceError> {
        let id = ensure_page_id(id)?;

        self.repository
            .find_by_id(&id)
            .await?
            .ok_or(PageServiceError::NotFound)
    }

    /// Validate `body` and store it as a new page
    pub async fn create_page(&self, body: &Value) -> Result<Page, PageServiceError> {
        let payload = PagePayload::parse(body)?;

        if self.repository.slug_in_use(&payload.slug, None).await? {
            return Err(PageServiceError::conflict(payload.slug));
        }

        self.validator.validate_components(&payload.components)?;
        let slug = payload.slug.clone();
        let input = payload.into_input()?;

        let page = self
            .repository
            .insert(&input)
            .await
            .map_err(|e| translate_write_error(e, &slug))?;

        tracing::info!(id = %page.id, slug = %page.slug, "Created page");
        Ok(page)
    }

    /// Replace the content of page `id` with `body`
    ///
    /// Slug uniqueness is only rechecked when the slug changes.
    pub async fn update_page(&self, id: &str, body: &Value) -> Result<Page, PageServiceError> {
        let id = ensure_page_id(id)?;

        let existing = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or(PageServiceError::NotFound)?;

        let payload = PagePayload::parse(body)?;

        if payload.slug != existing.slug
            && self.repository.slug_in_use(&payload.slug, Some(&id)).await?
        {
            return Err(PageServiceError::conflict(payload.slug));
        }

        self.validator.validate_components(&payload.components)?;
        let slug = payload.slug.clone();
        let input = payload.into_input()?;

        let page = self
            .repository
            .update(&id, &input)
            .await
            .map_err(|e| translate_write_error(e, &slug))?
            .ok_or(PageServiceError::NotFound)?;

        tracing::info!(id = %page.id, slug = %page.slug, "Updated page");
        Ok(page)
    }

    pub async fn delete_page(&self, id: &str) -> Result<(), PageServiceError> {
        let id = ensure_page_id(id)?;

        if !self.repository.delete(&id).await? {
            return Err(PageServiceError::NotFound);
        }

        tracing::info!(id = %id, "Deleted page");
        Ok(())
    }
}

/// Validate `id` and return it in the lowercase form storage assigns
fn ensure_page_id(id: &str) -> Result<String, PageServiceError> {
    if is_valid_page_id(id) {
        Ok(id.to_ascii_lowercase())
    } else {
        Err(PageServiceError::malformed_identifier(id))
    }
}

fn translate_write_error(err: DatabaseError, slug: &str) -> PageServiceError {
    if err.is_unique_violation() {
        tracing::warn!(slug, "Slug claimed concurrently; rejected by storage constraint");
        PageServiceError::conflict(slug)
    } else {
        PageServiceError::DatabaseError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::ValidationError;
    use serde_json::json;

    fn service() -> PageService {
        PageService::new(Arc::new(MemoryStore::new()))
    }

    fn body(slug: &str) -> Value {
        json!({
            "slug": slug,
            "title": "Page",
            "components": [{ "type": "Text", "id": "t1", "props": { "content": "x" } }]
        })
    }

    #[tokio::test]
    async fn get_by_id_rejects_malformed_ids_before_lookup() {
        let err = service().get_page_by_id("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, PageServiceError::MalformedIdentifier { ref id } if id == "not-a-uuid"));
    }

    #[tokio::test]
    async fn duplicate_slug_reports_conflict_before_tree_errors() {
        let service = service();
        service.create_page(&body("home")).await.unwrap();

        let mut invalid = body("home");
        invalid["components"] = json!([{ "type": "Bogus", "id": "b", "props": {} }]);

        let err = service.create_page(&invalid).await.unwrap_err();
        assert!(matches!(err, PageServiceError::Conflict { ref slug } if slug == "home"));
    }

    #[tokio::test]
    async fn invalid_tree_is_a_validation_failure() {
        let mut invalid = body("home");
        invalid["components"] = json!([{ "type": "Bogus", "id": "b", "props": {} }]);

        let err = service().create_page(&invalid).await.unwrap_err();
        assert!(matches!(
            err,
            PageServiceError::ValidationFailed(ValidationError::InvalidType(ref t)) if t == "Bogus"
        ));
    }

    #[tokio::test]
    async fn update_missing_page_is_not_found() {
        let id = uuid::Uuid::new_v4().to_string();
        let err = service().update_page(&id, &body("x")).await.unwrap_err();
        assert!(matches!(err, PageServiceError::NotFound));
    }

    #[tokio::test]
    async fn update_keeping_own_slug_succeeds() {
        let service = service();
        let page = service.create_page(&body("about")).await.unwrap();

        let mut changed = body("about");
        changed["title"] = json!("About us");
        let updated = service.update_page(&page.id, &changed).await.unwrap();

        assert_eq!(updated.id, page.id);
        assert_eq!(updated.title, "About us");
        assert!(updated.updated_at >= page.updated_at);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let service = service();
        let page = service.create_page(&body("gone")).await.unwrap();

        service.delete_page(&page.id).await.unwrap();
        let err = service.delete_page(&page.id).await.unwrap_err();
        assert!(matches!(err, PageServiceError::NotFound));
    }
}
