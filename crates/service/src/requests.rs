//! Admin board over the mock request list.
//!
//! Status changes live in memory for the lifetime of the process. They are not
//! persisted and never touch the application flow.

use std::{path::Path, sync::Arc};

use models::{service_request::parse_requests, RequestStatus, ServiceRequest};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::{errors::ServiceError, filter::RequestQuery, storage::json_table::load_table};

const SEED_REQUESTS: &str = include_str!("../data/requests.json");

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub rejected: usize,
    pub submitted: usize,
    /// Sum of `amount` over completed requests.
    pub completed_revenue: u64,
}

pub struct RequestBoard {
    inner: RwLock<Vec<ServiceRequest>>,
}

impl RequestBoard {
    pub fn new(requests: Vec<ServiceRequest>) -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(requests) })
    }

    /// Board seeded with the bundled mock list.
    pub fn seeded() -> Result<Arc<Self>, ServiceError> {
        Ok(Self::new(parse_requests(SEED_REQUESTS)?))
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Arc<Self>, ServiceError> {
        Ok(Self::new(load_table(path).await?))
    }

    /// Matching requests in board order.
    pub async fn list(&self, query: &RequestQuery) -> Vec<ServiceRequest> {
        let rows = self.inner.read().await;
        rows.iter().filter(|r| query.matches(r)).cloned().collect()
    }

    pub async fn get(&self, id: &str) -> Option<ServiceRequest> {
        let rows = self.inner.read().await;
        rows.iter().find(|r| r.id == id).cloned()
    }

    /// Apply an admin action. Only pending→processing, processing→completed and
    /// pending→rejected are offered.
    pub async fn set_status(&self, id: &str, next: RequestStatus) -> Result<ServiceRequest, ServiceError> {
        let mut rows = self.inner.write().await;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ServiceError::not_found("request"))?;
        if !row.status.can_transition_to(next) {
            return Err(ServiceError::transition(row.status, next));
        }
        row.status = next;
        Ok(row.clone())
    }

    pub async fn stats(&self) -> BoardStats {
        let rows = self.inner.read().await;
        let mut stats = BoardStats { total: rows.len(), ..Default::default() };
        for r in rows.iter() {
            match r.status {
                RequestStatus::Pending => stats.pending += 1,
                RequestStatus::Processing => stats.processing += 1,
                RequestStatus::Completed => {
                    stats.completed += 1;
                    stats.completed_revenue += u64::from(r.amount);
                }
                RequestStatus::Rejected => stats.rejected += 1,
                RequestStatus::Submitted => stats.submitted += 1,
            }
        }
        stats
    }
}
