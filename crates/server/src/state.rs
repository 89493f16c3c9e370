use std::sync::Arc;

use service::{catalog::Catalog, requests::RequestBoard, runtime::HubServices, sessions::ApplicationSessions};

/// Shared handler state. Everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub hub: HubServices,
}

impl AppState {
    pub fn new(hub: HubServices) -> Self { Self { hub } }

    pub fn catalog(&self) -> &Arc<Catalog> { &self.hub.catalog }

    pub fn sessions(&self) -> &Arc<ApplicationSessions> { &self.hub.sessions }

    pub fn board(&self) -> &Arc<RequestBoard> { &self.hub.board }
}
