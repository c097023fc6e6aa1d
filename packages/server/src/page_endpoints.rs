//! Page Endpoints
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/pages` (or `/api/pages/`) - List all pages, newest first
//! - `GET /api/pages/id/:id` - Get a page by id
//! - `GET /api/pages/*slug` - Get a page by (possibly nested) slug
//! - `POST /api/pages` - Create a page
//! - `PUT /api/pages/:id` - Replace a page
//! - `DELETE /api/pages/:id` - Delete a page
//!
//! GET requests under the namespace are classified by [`SlugResolver`](pagecraft_core::SlugResolver), so
//! `/api/pages/id/<x>` and `/api/pages/blog/post` share one route and the
//! reserved `id` segment always wins.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use pagecraft_core::{Page, PageIntent, PAGES_NAMESPACE};

use crate::envelope::{ApiResponse, MessageBody};
use crate::http_error::{self, HttpError};
use crate::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, HttpError>;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub message: String,
    pub timestamp: String,
}

pub fn routes(state: AppState) -> Router {
    let member = format!("{}/*path", PAGES_NAMESPACE);

    Router::new()
        .route("/health", get(health_check).fallback(route_not_found))
        .route(
            PAGES_NAMESPACE,
            get(list_pages).post(create_page).fallback(route_not_found),
        )
        .route(
            &member,
            get(get_page)
                .put(update_page)
                .delete(delete_page)
                .fallback(route_not_found),
        )
        .fallback(unmatched)
        .with_state(state)
}

async fn health_check() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::ok(HealthStatus {
        message: "Pagecraft API is running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

async fn list_pages(State(state): State<AppState>) -> ApiResult<Vec<Page>> {
    let pages = state.page_service.get_all_pages().await?;
    Ok(Json(ApiResponse::ok(pages)))
}

/// Slug or id lookup, decided by the slug resolver
async fn get_page(State(state): State<AppState>, uri: Uri) -> Result<Response, HttpError> {
    let page = match state.resolver.resolve(uri.path()) {
        PageIntent::GetById(id) => state.page_service.get_page_by_id(&id).await?,
        PageIntent::GetBySlug(slug) => state.page_service.get_page_by_slug(&slug).await?,
        PageIntent::ListAll => return Ok(list_pages(State(state)).await?.into_response()),
    };
    Ok(Json(ApiResponse::ok(page)).into_response())
}

async fn create_page(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Page>>), HttpError> {
    let Json(body) = body?;
    let page = state.page_service.create_page(&body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(page))))
}

async fn update_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Page> {
    let Json(body) = body?;
    let page = state
        .page_service
        .update_page(id.trim_start_matches('/'), &body)
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

async fn delete_page(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<MessageBody> {
    state
        .page_service
        .delete_page(id.trim_start_matches('/'))
        .await?;
    Ok(Json(ApiResponse::ok(MessageBody {
        message: "Page deleted successfully".to_string(),
    })))
}

/// Router fallback. `GET <namespace>/` is the collection; the wildcard
/// route cannot match an empty remainder.
async fn unmatched(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, HttpError> {
    let under_namespace = uri
        .path()
        .strip_prefix(state.resolver.namespace())
        .is_some_and(|rest| rest.starts_with('/'));

    if method == Method::GET
        && under_namespace
        && state.resolver.resolve(uri.path()) == PageIntent::ListAll
    {
        return Ok(list_pages(State(state)).await?.into_response());
    }

    Err(route_not_found(method, uri).await)
}

async fn route_not_found(method: Method, uri: Uri) -> HttpError {
    HttpError::new(
        format!("Route {} {} not found", method, uri.path()),
        http_error::ROUTE_NOT_FOUND,
    )
}
