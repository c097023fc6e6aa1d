//! Page Repository - Typed Adapter over PageStore
//!
//! Maps between storage rows ([`PageRecord`], schema-less JSON payloads) and
//! typed [`Page`] entities, and shapes writes into [`PageDraft`]s. Holds no
//! business rules: uniqueness and not-found semantics live in `PageService`.

use crate::db::{DatabaseError, PageDraft, PageRecord, PageStore};
use crate::models::{CreatePageInput, Page};
use std::sync::Arc;

#[derive(Clone)]
pub struct PageRepository {
    store: Arc<dyn PageStore>,
}

impl PageRepository {
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self { store }
    }

    /// All pages, most recently created first
    pub async fn find_all(&self) -> Result<Vec<Page>, DatabaseError> {
        self.store
            .find_all()
            .await?
            .into_iter()
            .map(record_to_page)
            .collect()
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, DatabaseError> {
        self.store
            .find_by_slug(slug)
            .await?
            .map(record_to_page)
            .transpose()
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Page>, DatabaseError> {
        self.store.find_by_id(id).await?.map(record_to_page).transpose()
    }

    /// Whether any page other than `exclude_id` uses `slug`
    pub async fn slug_in_use(
        &self,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, DatabaseError> {
        Ok(self.store.count_with_slug(slug, exclude_id).await? > 0)
    }

    pub async fn insert(&self, input: &CreatePageInput) -> Result<Page, DatabaseError> {
        let record = self.store.insert(input_to_draft(input)?).await?;
        record_to_page(record)
    }

    /// `Ok(None)` when the page vanished before the write
    pub async fn update(&self, id: &str, input: &CreatePageInput) -> Result<Option<Page>, DatabaseError> {
        self.store
            .update(id, input_to_draft(input)?)
            .await?
            .map(record_to_page)
            .transpose()
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        self.store.delete(id).await
    }
}

fn record_to_page(record: PageRecord) -> Result<Page, DatabaseError> {
    let metadata = record
        .metadata
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| {
            DatabaseError::invalid_row(format!("Page {} has invalid metadata: {}", record.id, e))
        })?;

    let components = serde_json::from_value(record.components).map_err(|e| {
        DatabaseError::invalid_row(format!("Page {} has invalid components: {}", record.id, e))
    })?;

    Ok(Page {
        id: record.id,
        slug: record.slug,
        title: record.title,
        metadata,
        components,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

fn input_to_draft(input: &CreatePageInput) -> Result<PageDraft, DatabaseError> {
    let serialize = |what: &str, e: serde_json::Error| {
        DatabaseError::sql_execution(format!("Failed to serialize {}: {}", what, e))
    };

    let metadata = input
        .metadata
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| serialize("metadata", e))?;
    let components =
        serde_json::to_value(&input.components).map_err(|e| serialize("components", e))?;

    Ok(PageDraft {
        slug: input.slug.clone(),
        title: input.title.clone(),
        metadata,
        components,
    })
}
