//! HTTP error handling
//!
//! Every failure leaves the server as the standard envelope with
//! `success: false`. Storage errors are logged and replaced by a generic
//! message; their text never reaches the client.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pagecraft_core::services::PageServiceError;

use crate::envelope::ApiResponse;

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const ROUTE_NOT_FOUND: &str = "ROUTE_NOT_FOUND";
pub const CONFLICT: &str = "CONFLICT";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const INVALID_ID: &str = "INVALID_ID";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// User-facing error message
    pub message: String,
    /// Machine-readable error code, selects the status
    pub code: &'static str,
}

impl HttpError {
    pub fn new(message: impl Into<String>, code: &'static str) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    pub fn internal() -> Self {
        Self::new("Internal server error", INTERNAL_ERROR)
    }

    pub fn status(&self) -> StatusCode {
        match self.code {
            NOT_FOUND | ROUTE_NOT_FOUND => StatusCode::NOT_FOUND,
            VALIDATION_ERROR | INVALID_ID => StatusCode::BAD_REQUEST,
            CONFLICT => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status(), Json(ApiResponse::failure(self.message))).into_response()
    }
}

impl From<PageServiceError> for HttpError {
    fn from(err: PageServiceError) -> Self {
        match err {
            PageServiceError::NotFound => HttpError::new("Page not found", NOT_FOUND),
            PageServiceError::Conflict { .. } => {
                HttpError::new("A page with this slug already exists", CONFLICT)
            }
            PageServiceError::ValidationFailed(e) => HttpError::new(e.to_string(), VALIDATION_ERROR),
            PageServiceError::MalformedIdentifier { .. } => {
                HttpError::new("Invalid page ID format", INVALID_ID)
            }
            PageServiceError::DatabaseError(e) => {
                tracing::error!(error = %e, "Page operation failed");
                HttpError::internal()
            }
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        HttpError::new("Request body must be valid JSON", VALIDATION_ERROR)
    }
}
