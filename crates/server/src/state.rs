use std::sync::Arc;

use service::EntityStore;

/// Shared handler state: the one entity store built at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EntityStore>,
}

impl AppState {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}
