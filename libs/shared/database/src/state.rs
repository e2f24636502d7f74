use std::sync::Arc;

use tracing::{info, warn};

use shared_config::AppConfig;

use crate::memory::InMemoryStore;
use crate::rest::RestDocumentStore;
use crate::store::DocumentStore;

/// Shared handler state: the one store connection every cell talks to.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Uses the REST store when `DATABASE_URL` is set, otherwise an in-memory one.
    pub fn from_config(config: &AppConfig) -> Self {
        if config.is_configured() {
            let store = RestDocumentStore::new(config);
            info!("Using document store at {}", store.base_url());
            Self::new(Arc::new(store))
        } else {
            warn!("Using in-memory document store; data is lost on shutdown");
            Self::in_memory()
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }
}
