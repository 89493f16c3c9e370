use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::NavAction;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": title, "detail": ..., "action": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
    pub action: Option<NavAction>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<&'a NavAction>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail, action: None }
    }

    /// Terminal view for an unknown service id: one way out, back to the catalog.
    pub fn service_not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            title: "Service not found",
            detail: None,
            action: Some(NavAction::BACK_TO_CATALOG),
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, detail = ?self.detail, "request failed");
        }
        let body = ErrorBody {
            error: self.title,
            detail: self.detail.as_deref(),
            action: self.action.as_ref(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let detail = Some(e.to_string());
        match e {
            ServiceError::Validation(_) | ServiceError::Model(_) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", detail)
            }
            ServiceError::NotFound(_) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", detail),
            ServiceError::IncompleteContact(_) => {
                JsonApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Incomplete Contact", detail)
            }
            ServiceError::InvalidTransition { .. } => JsonApiError::new(StatusCode::CONFLICT, "Conflict", detail),
            ServiceError::Data(_) => JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", detail),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot load service tables: {0}")]
    Tables(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
