//! Pagecraft HTTP server
//!
//! Exposes `PageService` as a JSON REST API. Every response body uses the
//! `{success, data?, error?}` envelope.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001, ~/.pagecraft/database/pages.db)
//! cargo run --bin pages-server
//!
//! # Custom port and database
//! PORT=8080 DATABASE_PATH=/tmp/pages.db cargo run --bin pages-server
//! ```

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use pagecraft_core::db::{DatabaseService, TursoStore};
use pagecraft_core::{PageService, SlugResolver};

pub mod config;
pub mod envelope;
pub mod http_error;
pub mod page_endpoints;

pub use config::{ConfigError, Environment, ServerConfig};
pub use envelope::ApiResponse;
pub use http_error::HttpError;

/// Application state shared across all endpoints
#[derive(Clone)]
pub struct AppState {
    pub page_service: PageService,
    pub resolver: SlugResolver,
}

impl AppState {
    pub fn new(page_service: PageService) -> Self {
        Self {
            page_service,
            resolver: SlugResolver::default(),
        }
    }
}

/// Create the application router with all endpoint modules
pub fn create_router(state: AppState, cors_origin: HeaderValue) -> Router {
    Router::new()
        .merge(page_endpoints::routes(state))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Open the database, build the services and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns error if the database cannot be opened or the server fails to
/// bind or start.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("📦 Database: {}", config.database_path.display());
    let db = Arc::new(DatabaseService::new(config.database_path.clone()).await?);
    let page_service = PageService::new(Arc::new(TursoStore::new(db)));

    let app = create_router(AppState::new(page_service), config.cors_origin.clone());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Server running on http://{}", addr);
    tracing::info!("📡 CORS enabled for {:?}", config.cors_origin);
    tracing::info!("🌍 Environment: {}", config.environment);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl-C received, shutting down gracefully..."),
        _ = terminate => tracing::info!("SIGTERM received, shutting down gracefully..."),
    }
}
