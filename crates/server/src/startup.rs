use std::{net::SocketAddr, path::PathBuf, time::Duration};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::runtime::{HubServices, RuntimeOptions};

use crate::{errors::StartupError, routes, state::AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Map the loaded configuration onto service runtime options
pub fn runtime_options(cfg: &AppConfig) -> RuntimeOptions {
    RuntimeOptions {
        catalog_path: cfg.catalog.path.as_ref().map(PathBuf::from),
        requests_path: cfg.admin.requests_path.as_ref().map(PathBuf::from),
        submission_delay: Duration::from_millis(cfg.submission.delay_ms),
        session_idle: Duration::from_secs(cfg.sessions.idle_ttl_secs),
    }
}

/// Configured table overrides must exist before anything is loaded.
async fn check_table_paths(cfg: &AppConfig) -> Result<(), StartupError> {
    let configured = [("catalog.path", &cfg.catalog.path), ("admin.requests_path", &cfg.admin.requests_path)];
    for (key, path) in configured {
        if let Some(path) = path {
            common::env::require_file(path)
                .await
                .map_err(|e| StartupError::InvalidConfig(format!("{key}: {e}")))?;
        }
    }
    Ok(())
}

/// Load tables and assemble handler state
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    check_table_paths(cfg).await?;
    let hub = HubServices::load(&runtime_options(cfg)).await?;
    Ok(AppState::new(hub))
}

/// Router with the configured static directory and permissive CORS
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(cfg).await?;
    common::env::check_static_dir(&cfg.server.static_dir).await;
    Ok(routes::build_router(state, build_cors(), &cfg.server.static_dir))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Public entry: build the app and run the HTTP server until the listener fails
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    info!(%addr, static_dir = %cfg.server.static_dir, "starting mp online hub server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
