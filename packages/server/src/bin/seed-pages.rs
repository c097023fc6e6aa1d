//! Seed Pages Binary
//!
//! Inserts a sample `home` page into the configured database. Running it
//! twice is harmless: an existing `home` page is reported and left alone.
//!
//! ```bash
//! DATABASE_PATH=/tmp/pages.db cargo run --bin seed-pages
//! ```

use anyhow::Context;
use pagecraft_core::db::{DatabaseService, TursoStore};
use pagecraft_core::{PageService, PageServiceError};
use pagecraft_server::ServerConfig;
use serde_json::{json, Value};
use std::sync::Arc;

fn home_page() -> Value {
    json!({
        "slug": "home",
        "title": "Home",
        "metadata": {
            "description": "Latest news and featured articles",
            "keywords": ["news", "articles"]
        },
        "components": [
            {
                "type": "Hero",
                "id": "hero-1",
                "props": {
                    "title": "Welcome",
                    "subtitle": "Stories worth reading",
                    "backgroundImage": "/images/hero.jpg"
                }
            },
            {
                "type": "ArticleList",
                "id": "article-list-1",
                "props": { "title": "Featured", "layout": "grid" },
                "children": [
                    {
                        "type": "ArticleCard",
                        "id": "article-card-1",
                        "props": {
                            "title": "Getting started",
                            "excerpt": "How this site is put together",
                            "image": "/images/article-1.jpg",
                            "slug": "blog/getting-started"
                        }
                    },
                    {
                        "type": "ArticleCard",
                        "id": "article-card-2",
                        "props": {
                            "title": "Nested pages",
                            "excerpt": "Organizing content with hierarchical slugs",
                            "image": "/images/article-2.jpg",
                            "slug": "blog/nested-pages"
                        }
                    }
                ]
            },
            {
                "type": "Section",
                "id": "section-1",
                "props": { "title": "About" },
                "children": [
                    {
                        "type": "Text",
                        "id": "text-1",
                        "props": { "content": "Pages are built from nested components." }
                    }
                ]
            }
        ]
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!("📦 Database: {}", config.database_path.display());

    let db = Arc::new(
        DatabaseService::new(config.database_path.clone())
            .await
            .context("Failed to open database")?,
    );
    let service = PageService::new(Arc::new(TursoStore::new(db)));

    match service.create_page(&home_page()).await {
        Ok(page) => tracing::info!("✅ Seeded page '{}' ({})", page.slug, page.id),
        Err(PageServiceError::Conflict { slug }) => {
            tracing::info!("Page '{}' already exists, skipping", slug)
        }
        Err(e) => return Err(e).context("Failed to seed home page"),
    }

    Ok(())
}
