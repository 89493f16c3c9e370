use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static CATALOG_QUERIES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "mp_hub_catalog_queries_total",
        "Total catalog list queries"
    )
    .expect("register catalog_queries_total")
});

pub static SESSIONS_OPENED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "mp_hub_application_sessions_opened_total",
        "Total application sessions opened"
    )
    .expect("register sessions_opened_total")
});

pub static SESSIONS_EVICTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "mp_hub_application_sessions_evicted_total",
        "Total application sessions dropped after sitting idle"
    )
    .expect("register sessions_evicted_total")
});

pub static SUBMISSIONS_STARTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "mp_hub_submissions_started_total",
        "Total submissions moved to submitting"
    )
    .expect("register submissions_started_total")
});

pub static SUBMISSIONS_COMPLETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "mp_hub_submissions_completed_total",
        "Total submissions that reached succeeded"
    )
    .expect("register submissions_completed_total")
});

pub static ADMIN_STATUS_CHANGES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "mp_hub_admin_status_changes_total",
        "Admin board status changes by target status",
        &["status"]
    )
    .expect("register admin_status_changes_total")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
