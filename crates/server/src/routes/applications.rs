use axum::{extract::{Path, State}, http::StatusCode, Json};
use models::{Attachment, ContactDetails, ContactPatch, FileDescriptor};
use serde::{Deserialize, Serialize};
use service::{
    application::{ApplicationForm, FormAction},
    submission::SubmissionState,
};
use tracing::info;
use uuid::Uuid;

use crate::{errors::JsonApiError, state::AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: u32,
    pub required_documents: Vec<String>,
}

/// What the application view renders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: Uuid,
    pub service: ServiceSummary,
    pub contact: ContactDetails,
    pub attachments: Vec<Attachment>,
    pub attachment_count: usize,
    pub submission: SubmissionState,
    pub can_submit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddAttachmentsInput {
    pub files: Vec<FileDescriptor>,
}

fn view(state: &AppState, session_id: Uuid, form: ApplicationForm) -> Result<SessionView, JsonApiError> {
    let service = state
        .catalog()
        .get(&form.service_id)
        .ok_or_else(JsonApiError::service_not_found)?;
    let redirect_to = match &form.submission {
        SubmissionState::Succeeded { receipt } => Some(receipt.redirect_to.clone()),
        _ => None,
    };
    Ok(SessionView {
        session_id,
        service: ServiceSummary {
            id: service.id.clone(),
            title: service.title.clone(),
            category: service.category.clone(),
            price: service.price,
            required_documents: service.required_documents.clone(),
        },
        can_submit: form.can_submit(),
        attachment_count: form.attachments.len(),
        attachments: form.attachments.items().to_vec(),
        contact: form.contact,
        submission: form.submission,
        redirect_to,
    })
}

#[utoipa::path(
    post, path = "/api/services/{id}/applications", tag = "applications",
    params(("id" = String, Path, description = "Service id")),
    responses((status = 201, description = "Session opened"), (status = 404, description = "Service not found"))
)]
pub async fn open(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<(StatusCode, Json<SessionView>), JsonApiError> {
    let service = state.catalog().get(&service_id).ok_or_else(JsonApiError::service_not_found)?;
    let (session_id, form) = state.sessions().open(service);
    Ok((StatusCode::CREATED, Json(view(&state, session_id, form)?)))
}

#[utoipa::path(
    get, path = "/api/applications/{sid}", tag = "applications",
    params(("sid" = Uuid, Path, description = "Session id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<AppState>, Path(sid): Path<Uuid>) -> Result<Json<SessionView>, JsonApiError> {
    let form = state.sessions().get(sid)?;
    Ok(Json(view(&state, sid, form)?))
}

#[utoipa::path(
    patch, path = "/api/applications/{sid}/contact", tag = "applications",
    params(("sid" = Uuid, Path, description = "Session id")),
    request_body = crate::openapi::ContactPatchDoc,
    responses((status = 200, description = "Updated"), (status = 409, description = "Form locked"))
)]
pub async fn edit_contact(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(patch): Json<ContactPatch>,
) -> Result<Json<SessionView>, JsonApiError> {
    let form = state.sessions().dispatch(sid, FormAction::EditContact(patch))?;
    Ok(Json(view(&state, sid, form)?))
}

#[utoipa::path(
    post, path = "/api/applications/{sid}/attachments", tag = "applications",
    params(("sid" = Uuid, Path, description = "Session id")),
    request_body = crate::openapi::AddAttachmentsDoc,
    responses((status = 200, description = "Attachments added"), (status = 409, description = "Form locked"))
)]
pub async fn add_attachments(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(input): Json<AddAttachmentsInput>,
) -> Result<Json<SessionView>, JsonApiError> {
    let form = state.sessions().dispatch(sid, FormAction::AddFiles(input.files))?;
    Ok(Json(view(&state, sid, form)?))
}

/// Unknown attachment ids are a no-op, the current list is returned either way.
#[utoipa::path(
    delete, path = "/api/applications/{sid}/attachments/{aid}", tag = "applications",
    params(("sid" = Uuid, Path, description = "Session id"), ("aid" = String, Path, description = "Attachment id")),
    responses((status = 200, description = "Current attachment list"))
)]
pub async fn remove_attachment(
    State(state): State<AppState>,
    Path((sid, aid)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, JsonApiError> {
    let form = state.sessions().dispatch(sid, FormAction::RemoveFile(aid))?;
    Ok(Json(view(&state, sid, form)?))
}

#[utoipa::path(
    post, path = "/api/applications/{sid}/submit", tag = "applications",
    params(("sid" = Uuid, Path, description = "Session id")),
    responses(
        (status = 202, description = "Submitting"),
        (status = 409, description = "Already submitting or submitted"),
        (status = 422, description = "Required contact fields missing")
    )
)]
pub async fn submit(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionView>), JsonApiError> {
    let form = state.sessions().submit(sid)?;
    Ok((StatusCode::ACCEPTED, Json(view(&state, sid, form)?)))
}

#[utoipa::path(
    delete, path = "/api/applications/{sid}", tag = "applications",
    params(("sid" = Uuid, Path, description = "Session id")),
    responses((status = 204, description = "Discarded"), (status = 404, description = "Not Found"))
)]
pub async fn discard(State(state): State<AppState>, Path(sid): Path<Uuid>) -> StatusCode {
    if state.sessions().discard(sid) {
        info!(session_id = %sid, "application session closed");
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
