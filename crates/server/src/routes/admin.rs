use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::metrics::ADMIN_STATUS_CHANGES_TOTAL;
use models::{RequestStatus, ServiceRequest};
use serde::Deserialize;
use service::{
    errors::ServiceError,
    filter::{RequestQuery, StatusSelector},
    requests::BoardStats,
};
use tracing::info;

use crate::{errors::JsonApiError, state::AppState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RequestParams {
    /// Substring of customer name, service title or request id
    pub q: Option<String>,
    /// `all` or one of pending, processing, completed, rejected, submitted
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: RequestStatus,
}

#[utoipa::path(
    get, path = "/api/admin/requests", tag = "admin",
    params(RequestParams),
    responses((status = 200, description = "Filtered requests"), (status = 400, description = "Unknown status"))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RequestParams>,
) -> Result<Json<Vec<ServiceRequest>>, JsonApiError> {
    let status = StatusSelector::parse(params.status.as_deref())
        .map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))?;
    let query = RequestQuery { text: params.q.unwrap_or_default(), status };
    Ok(Json(state.board().list(&query).await))
}

#[utoipa::path(get, path = "/api/admin/requests/stats", tag = "admin", responses((status = 200, description = "Summary cards")))]
pub async fn stats(State(state): State<AppState>) -> Json<BoardStats> {
    Json(state.board().stats().await)
}

#[utoipa::path(
    get, path = "/api/admin/requests/{id}", tag = "admin",
    params(("id" = String, Path, description = "Request id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ServiceRequest>, JsonApiError> {
    let request = state.board().get(&id).await.ok_or_else(|| ServiceError::not_found("request"))?;
    Ok(Json(request))
}

#[utoipa::path(
    put, path = "/api/admin/requests/{id}/status", tag = "admin",
    params(("id" = String, Path, description = "Request id")),
    request_body = crate::openapi::StatusInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Transition not offered")
    )
)]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<StatusInput>,
) -> Result<Json<ServiceRequest>, JsonApiError> {
    let updated = state.board().set_status(&id, input.status).await?;
    ADMIN_STATUS_CHANGES_TOTAL.with_label_values(&[updated.status.as_str()]).inc();
    info!(request_id = %updated.id, status = %updated.status, "request status changed");
    Ok(Json(updated))
}
