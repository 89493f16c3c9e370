use axum::{extract::{Path, Query, State}, Json};
use common::metrics::CATALOG_QUERIES_TOTAL;
use models::{service::{numbered, NumberedItem}, Service};
use serde::{Deserialize, Serialize};
use service::{
    fees::FeeBreakdown,
    filter::{CatalogQuery, CategorySelector},
};
use tracing::debug;

use crate::{errors::JsonApiError, state::AppState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogParams {
    /// Case-insensitive substring of title or description
    pub q: Option<String>,
    /// `all` or an exact category
    pub category: Option<String>,
    /// Only services flagged popular
    pub popular: Option<bool>,
}

impl CatalogParams {
    fn to_query(&self) -> CatalogQuery {
        CatalogQuery {
            text: self.q.clone().unwrap_or_default(),
            category: CategorySelector::parse(self.category.as_deref()),
            popular_only: self.popular.unwrap_or(false),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogListing {
    pub count: usize,
    pub services: Vec<Service>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetail {
    pub service: Service,
    pub fees: FeeBreakdown,
    pub instructions: Vec<NumberedItem>,
    pub processing_steps: Vec<NumberedItem>,
    pub apply_href: String,
}

impl ServiceDetail {
    fn from_service(service: &Service) -> Self {
        Self {
            fees: FeeBreakdown::from_price(service.price),
            instructions: numbered(&service.instructions),
            processing_steps: numbered(&service.processing_steps),
            apply_href: format!("/apply/{}", service.id),
            service: service.clone(),
        }
    }
}

#[utoipa::path(
    get, path = "/api/services", tag = "catalog",
    params(CatalogParams),
    responses((status = 200, description = "Filtered catalog, possibly empty"))
)]
pub async fn list(State(state): State<AppState>, Query(params): Query<CatalogParams>) -> Json<CatalogListing> {
    CATALOG_QUERIES_TOTAL.inc();
    let query = params.to_query();
    let services: Vec<Service> = state.catalog().filter(&query).into_iter().cloned().collect();
    debug!(q = %query.text, category = ?query.category, count = services.len(), "catalog query");
    Json(CatalogListing { count: services.len(), services })
}

#[utoipa::path(get, path = "/api/categories", tag = "catalog", responses((status = 200, description = "Distinct categories")))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog().categories().into_iter().map(str::to_string).collect())
}

#[utoipa::path(
    get, path = "/api/services/{id}", tag = "catalog",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service detail with fee breakdown"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ServiceDetail>, JsonApiError> {
    let service = state.catalog().get(&id).ok_or_else(JsonApiError::service_not_found)?;
    Ok(Json(ServiceDetail::from_service(service)))
}
