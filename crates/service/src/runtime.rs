//! Runtime assembly of the service layer.
//!
//! Loads the read-only tables once and wires the session store to a submitter.

use std::{path::PathBuf, sync::Arc, time::Duration};

use tracing::info;

use crate::{
    catalog::Catalog,
    errors::ServiceError,
    requests::RequestBoard,
    sessions::ApplicationSessions,
    submission::SimulatedSubmitter,
};

const SESSION_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct RuntimeOptions {
    /// JSON file replacing the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    /// JSON file replacing the bundled admin board seed.
    pub requests_path: Option<PathBuf>,
    pub submission_delay: Duration,
    /// Application sessions idle for longer than this are evicted.
    pub session_idle: Duration,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            catalog_path: None,
            requests_path: None,
            submission_delay: Duration::from_millis(2000),
            session_idle: Duration::from_secs(30 * 60),
        }
    }
}

#[derive(Clone)]
pub struct HubServices {
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<ApplicationSessions>,
    pub board: Arc<RequestBoard>,
}

impl HubServices {
    pub async fn load(opts: &RuntimeOptions) -> Result<Self, ServiceError> {
        let catalog = match &opts.catalog_path {
            Some(path) => Catalog::from_file(path).await?,
            None => Catalog::builtin()?,
        };
        let board = match &opts.requests_path {
            Some(path) => RequestBoard::from_file(path).await?,
            None => RequestBoard::seeded()?,
        };
        info!(
            services = catalog.len(),
            categories = catalog.categories().len(),
            delay_ms = opts.submission_delay.as_millis() as u64,
            session_idle_secs = opts.session_idle.as_secs(),
            "service tables loaded"
        );
        let sessions = ApplicationSessions::new(Arc::new(SimulatedSubmitter::new(opts.submission_delay)));
        if !opts.session_idle.is_zero() {
            sessions.spawn_idle_sweeper(opts.session_idle, SESSION_SWEEP_PERIOD.min(opts.session_idle));
        }
        Ok(Self { catalog: Arc::new(catalog), sessions, board })
    }
}
