//! MemoryStore - In-Process PageStore
//!
//! Holds pages in a `Vec` behind a mutex. Used by tests that want the
//! PageStore contract (including the unique-slug rejection) without a
//! database file.

use crate::db::page_store::{PageDraft, PageRecord, PageStore};
use crate::db::DatabaseError;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    /// Pages in insertion order
    pages: Mutex<Vec<PageRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn pages(&self) -> MutexGuard<'_, Vec<PageRecord>> {
        self.pages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PageStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<PageRecord>, DatabaseError> {
        let mut pages: Vec<PageRecord> = self.pages().iter().rev().cloned().collect();
        // Stable sort keeps reverse insertion order for equal timestamps
        pages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pages)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, DatabaseError> {
        Ok(self.pages().iter().find(|p| p.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PageRecord>, DatabaseError> {
        Ok(self.pages().iter().find(|p| p.id == id).cloned())
    }

    async fn count_with_slug(
        &self,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> Result<u64, DatabaseError> {
        let count = self
            .pages()
            .iter()
            .filter(|p| p.slug == slug && Some(p.id.as_str()) != exclude_id)
            .count();
        Ok(count as u64)
    }

    async fn insert(&self, draft: PageDraft) -> Result<PageRecord, DatabaseError> {
        let mut pages = self.pages();
        if pages.iter().any(|p| p.slug == draft.slug) {
            return Err(DatabaseError::unique_violation("pages.slug"));
        }

        let now = Utc::now();
        let record = PageRecord {
            id: Uuid::new_v4().to_string(),
            slug: draft.slug,
            title: draft.title,
            metadata: draft.metadata,
            components: draft.components,
            created_at: now,
            updated_at: now,
        };
        pages.push(record.clone());

        Ok(record)
    }

    async fn update(&self, id: &str, draft: PageDraft) -> Result<Option<PageRecord>, DatabaseError> {
        let mut pages = self.pages();
        if pages.iter().any(|p| p.slug == draft.slug && p.id != id) {
            return Err(DatabaseError::unique_violation("pages.slug"));
        }

        let Some(record) = pages.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        record.slug = draft.slug;
        record.title = draft.title;
        record.metadata = draft.metadata;
        record.components = draft.components;
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut pages = self.pages();
        let before = pages.len();
        pages.retain(|p| p.id != id);
        Ok(pages.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(slug: &str) -> PageDraft {
        PageDraft {
            slug: slug.to_string(),
            title: format!("Page {}", slug),
            metadata: None,
            components: json!([{ "type": "Text", "id": "t", "props": {} }]),
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_slug() {
        let store = MemoryStore::new();
        store.insert(draft("home")).await.unwrap();

        let err = store.insert(draft("home")).await.unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn find_all_lists_newest_first() {
        let store = MemoryStore::new();
        store.insert(draft("first")).await.unwrap();
        store.insert(draft("second")).await.unwrap();
        store.insert(draft("third")).await.unwrap();

        let slugs: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let store = MemoryStore::new();
        let missing = Uuid::new_v4().to_string();

        assert_eq!(store.update(&missing, draft("x")).await.unwrap(), None);
        assert!(!store.delete(&missing).await.unwrap());
    }

    #[tokio::test]
    async fn count_with_slug_honors_exclusion() {
        let store = MemoryStore::new();
        let page = store.insert(draft("about")).await.unwrap();

        assert_eq!(store.count_with_slug("about", None).await.unwrap(), 1);
        assert_eq!(store.count_with_slug("about", Some(&page.id)).await.unwrap(), 0);
        assert_eq!(store.count_with_slug("contact", None).await.unwrap(), 0);
    }
}
