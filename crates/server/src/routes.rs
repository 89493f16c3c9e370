use axum::{
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::{metrics, types::Health};

use crate::{openapi::ApiDoc, state::AppState};

pub mod admin;
pub mod applications;
pub mod catalog;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// API routes only, without static assets or layers.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/services", get(catalog::list))
        .route("/api/categories", get(catalog::categories))
        .route("/api/services/:id", get(catalog::detail))
        .route("/api/services/:id/applications", post(applications::open))
        .route("/api/applications/:sid", get(applications::get).delete(applications::discard))
        .route("/api/applications/:sid/contact", axum::routing::patch(applications::edit_contact))
        .route("/api/applications/:sid/attachments", post(applications::add_attachments))
        .route(
            "/api/applications/:sid/attachments/:aid",
            axum::routing::delete(applications::remove_attachment),
        )
        .route("/api/applications/:sid/submit", post(applications::submit))
        .route("/api/admin/requests", get(admin::list))
        .route("/api/admin/requests/stats", get(admin::stats))
        .route("/api/admin/requests/:id", get(admin::get))
        .route("/api/admin/requests/:id/status", put(admin::set_status))
}

/// Build the full application router: health, metrics, docs, API and the static front-end
pub fn build_router(state: AppState, cors: CorsLayer, static_dir: &str) -> Router {
    let index = format!("{}/index.html", static_dir.trim_end_matches('/'));
    let static_files = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api_router())
        .fallback_service(static_files)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx 以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
