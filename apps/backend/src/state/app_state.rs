use std::sync::Arc;

use crate::state::security_config::SecurityConfig;
use crate::store::{DocumentStore, MemoryStore};

/// Application state containing shared resources.
///
/// The store handle is the injected document-store driver; no component
/// behind it caches request state, so a single instance is shared across
/// all concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(security: SecurityConfig) -> Self {
        Self::new(Arc::new(MemoryStore::new()), security)
    }
}
