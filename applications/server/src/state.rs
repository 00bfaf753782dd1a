/// Shared application state
use mockdb_core::UserStore;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state shared across all handlers
///
/// Reads share the lock; every mutation takes it exclusively.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<UserStore>>,
}

impl AppState {
    pub fn new(store: UserStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}
