use std::collections::HashMap;

use async_trait::async_trait;
use models::user::{User, UserId};
use tokio::sync::RwLock;

use super::UserStore;

struct Inner {
    next_id: UserId,
    items: HashMap<UserId, User>,
}

/// Process-lifetime user table guarded by a readers-writer lock.
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner { next_id: 1, items: HashMap::new() }),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, name: String) -> User {
        let mut inner = self.inner.write().await;
        // id and timestamp are taken inside the write section so ids follow admission order
        let user = User::new(inner.next_id, name);
        inner.items.insert(user.id, user.clone());
        inner.next_id += 1;
        user
    }

    async fn get(&self, id: UserId) -> Option<User> {
        let inner = self.inner.read().await;
        inner.items.get(&id).cloned()
    }

    async fn delete(&self, id: UserId) -> bool {
        let mut inner = self.inner.write().await;
        inner.items.remove(&id).is_some()
    }

    async fn list(&self) -> Vec<User> {
        let inner = self.inner.read().await;
        inner.items.values().cloned().collect()
    }
}
