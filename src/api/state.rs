use std::sync::Arc;

use crate::storage::StorageConfig;

/// Shared state for API handlers. Collections are opened per request from
/// the storage config; there is no cached store client.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
}

impl AppState {
    pub fn new(storage: StorageConfig) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }
}
