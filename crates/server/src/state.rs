use std::sync::Arc;

use service::{InMemoryUserStore, UserService, UserStore};

/// Shared handler state. Cloned per request; the store behind `users` is the only mutable part.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(users: UserService, max_body_bytes: usize) -> Self {
        Self { users, max_body_bytes }
    }

    /// Fresh state over an empty in-memory store.
    pub fn in_memory(max_body_bytes: usize) -> Self {
        let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        Self::new(UserService::new(store), max_body_bytes)
    }
}
