//! Page Service Integration Tests
//!
//! Exercises `PageService` against a real libsql database in a temp
//! directory, plus a store that always passes the advisory slug check so the
//! storage constraint path can be observed deterministically.
//!
//! ## Test Coverage
//! - Create, read by slug and id, list ordering
//! - Component trees come back structurally identical
//! - Slug conflicts on create and update, including concurrent creates
//! - Delete and not-found semantics
//! - Malformed identifiers, and ids in either letter case

#[cfg(test)]
mod page_service_tests {
    use anyhow::Result;
    use async_trait::async_trait;
    use pagecraft_core::db::{
        DatabaseError, DatabaseService, MemoryStore, PageDraft, PageRecord, PageStore, TursoStore,
    };
    use pagecraft_core::services::{PageService, PageServiceError};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Helper to create a service over a fresh database
    async fn create_test_service() -> Result<(PageService, TempDir)> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("pages.db");
        let db = Arc::new(DatabaseService::new(db_path).await?);
        let service = PageService::new(Arc::new(TursoStore::new(db)));
        Ok((service, temp_dir))
    }

    fn page_body(slug: &str, title: &str) -> Value {
        json!({
            "slug": slug,
            "title": title,
            "metadata": { "description": "A page", "keywords": ["a", "b"] },
            "components": [
                {
                    "type": "Section",
                    "id": "section-1",
                    "props": { "padding": "lg" },
                    "children": [
                        { "type": "Text", "id": "text-1", "props": { "content": "Hello" } },
                        {
                            "type": "Container",
                            "id": "container-1",
                            "props": {},
                            "children": [
                                { "type": "Image", "id": "img-1", "props": { "src": "/a.png", "alt": "A" } }
                            ]
                        }
                    ]
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_create_then_get_by_slug_and_id() -> Result<()> {
        let (service, _temp_dir) = create_test_service().await?;

        let created = service
            .create_page(&page_body("blog/my-post", "My Post"))
            .await?;
        assert_eq!(created.slug, "blog/my-post");
        assert_eq!(created.created_at, created.updated_at);

        let by_slug = service.get_page_by_slug("blog/my-post").await?;
        assert_eq!(by_slug.id, created.id);
        assert_eq!(by_slug.title, "My Post");

        let by_id = service.get_page_by_id(&created.id).await?;
        assert_eq!(by_id, by_slug);
        Ok(())
    }

    #[tokio::test]
    async fn test_components_round_trip_structurally() -> Result<()> {
        let (service, _temp_dir) = create_test_service().await?;
        let body = page_body("about", "About");

        service.create_page(&body).await?;
        let stored = service.get_page_by_slug("about").await?;

        // Same types, ids, props, children order and depth
        assert_eq!(serde_json::to_value(&stored.components)?, body["components"]);
        assert_eq!(stored.components[0].depth(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_conflict() -> Result<()> {
        let (service, _temp_dir) = create_test_service().await?;
        service.create_page(&page_body("home", "Home")).await?;

        let err = service
            .create_page(&page_body("home", "Another home"))
            .await
            .unwrap_err();
        assert!(matches!(err, PageServiceError::Conflict { ref slug } if slug == "home"));
        assert_eq!(service.get_all_pages().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_creates_with_same_slug_yield_one_page() -> Result<()> {
        let (service, _temp_dir) = create_test_service().await?;
        let first = page_body("race", "First");
        let second = page_body("race", "Second");

        let (a, b) = tokio::join!(service.create_page(&first), service.create_page(&second));

        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        for result in [a, b] {
            if let Err(err) = result {
                assert!(matches!(err, PageServiceError::Conflict { .. }), "got {:?}", err);
            }
        }
        assert_eq!(service.get_all_pages().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_slug_conflict_and_same_slug() -> Result<()> {
        let (service, _temp_dir) = create_test_service().await?;
        let home = service.create_page(&page_body("home", "Home")).await?;
        let about = service.create_page(&page_body("about", "About")).await?;

        let err = service
            .update_page(&about.id, &page_body("home", "About"))
            .await
            .unwrap_err();
        assert!(matches!(err, PageServiceError::Conflict { .. }));

        let updated = service
            .update_page(&home.id, &page_body("home", "Welcome"))
            .await?;
        assert_eq!(updated.title, "Welcome");
        assert_eq!(updated.created_at, home.created_at);
        assert!(updated.updated_at >= home.updated_at);

        let moved = service
            .update_page(&about.id, &page_body("company/about", "About"))
            .await?;
        assert_eq!(moved.slug, "company/about");
        assert!(matches!(
            service.get_page_by_slug("about").await,
            Err(PageServiceError::NotFound)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_then_not_found() -> Result<()> {
        let (service, _temp_dir) = create_test_service().await?;
        let page = service.create_page(&page_body("temp", "Temp")).await?;

        service.delete_page(&page.id).await?;

        assert!(matches!(
            service.get_page_by_id(&page.id).await,
            Err(PageServiceError::NotFound)
        ));
        assert!(matches!(
            service.get_page_by_slug("temp").await,
            Err(PageServiceError::NotFound)
        ));
        assert!(matches!(
            service.delete_page(&page.id).await,
            Err(PageServiceError::NotFound)
        ));

        // Slug is free again
        service.create_page(&page_body("temp", "Temp again")).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_ids_are_rejected() -> Result<()> {
        let (service, _temp_dir) = create_test_service().await?;

        for id in ["home", "123", "550e8400-e29b-41d4-a716"] {
            assert!(matches!(
                service.get_page_by_id(id).await,
                Err(PageServiceError::MalformedIdentifier { .. })
            ));
            assert!(matches!(
                service.delete_page(id).await,
                Err(PageServiceError::MalformedIdentifier { .. })
            ));
            assert!(matches!(
                service.update_page(id, &page_body("x", "X")).await,
                Err(PageServiceError::MalformedIdentifier { .. })
            ));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_uppercase_ids_address_the_same_page() -> Result<()> {
        let (service, _temp_dir) = create_test_service().await?;
        let page = service.create_page(&page_body("home", "Home")).await?;
        let upper = page.id.to_uppercase();
        assert_ne!(upper, page.id);

        let fetched = service.get_page_by_id(&upper).await?;
        assert_eq!(fetched.id, page.id);

        let updated = service
            .update_page(&upper, &page_body("home", "Welcome"))
            .await?;
        assert_eq!(updated.id, page.id);
        assert_eq!(updated.title, "Welcome");

        service.delete_page(&upper).await?;
        assert!(matches!(
            service.get_page_by_id(&page.id).await,
            Err(PageServiceError::NotFound)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_is_newest_first() -> Result<()> {
        let (service, _temp_dir) = create_test_service().await?;
        assert!(service.get_all_pages().await?.is_empty());

        for slug in ["one", "two", "three"] {
            service.create_page(&page_body(slug, slug)).await?;
        }

        let slugs: Vec<String> = service
            .get_all_pages()
            .await?
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["three", "two", "one"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_nesting_limit_applies_to_stored_pages() -> Result<()> {
        let (service, _temp_dir) = create_test_service().await?;

        // Deepest node sits at `depth`, the root at 0
        fn chain(depth: usize) -> Value {
            let mut node = json!({ "type": "Text", "id": "leaf", "props": {} });
            for level in 0..depth {
                node = json!({
                    "type": "Container",
                    "id": format!("c{}", level),
                    "props": {},
                    "children": [node]
                });
            }
            node
        }

        let mut body = page_body("deep", "Deep");
        body["components"] = json!([chain(10)]);
        service.create_page(&body).await?;

        body["slug"] = json!("deeper");
        body["components"] = json!([chain(11)]);
        assert!(matches!(
            service.create_page(&body).await,
            Err(PageServiceError::ValidationFailed(_))
        ));
        Ok(())
    }

    /// Store whose advisory slug count never sees existing pages
    struct StaleCountStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl PageStore for StaleCountStore {
        async fn find_all(&self) -> Result<Vec<PageRecord>, DatabaseError> {
            self.inner.find_all().await
        }

        async fn find_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, DatabaseError> {
            self.inner.find_by_slug(slug).await
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<PageRecord>, DatabaseError> {
            self.inner.find_by_id(id).await
        }

        async fn count_with_slug(
            &self,
            _slug: &str,
            _exclude_id: Option<&str>,
        ) -> Result<u64, DatabaseError> {
            Ok(0)
        }

        async fn insert(&self, draft: PageDraft) -> Result<PageRecord, DatabaseError> {
            self.inner.insert(draft).await
        }

        async fn update(
            &self,
            id: &str,
            draft: PageDraft,
        ) -> Result<Option<PageRecord>, DatabaseError> {
            self.inner.update(id, draft).await
        }

        async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_storage_constraint_violation_maps_to_conflict() -> Result<()> {
        let service = PageService::new(Arc::new(StaleCountStore {
            inner: MemoryStore::new(),
        }));
        service.create_page(&page_body("home", "Home")).await?;
        let about = service.create_page(&page_body("about", "About")).await?;

        let err = service
            .create_page(&page_body("home", "Home again"))
            .await
            .unwrap_err();
        assert!(matches!(err, PageServiceError::Conflict { ref slug } if slug == "home"));

        let err = service
            .update_page(&about.id, &page_body("home", "About"))
            .await
            .unwrap_err();
        assert!(matches!(err, PageServiceError::Conflict { .. }));
        Ok(())
    }
}
