use std::sync::Arc;

use models::user::{self, User, UserId};
use tracing::{debug, info};

use crate::{errors::ServiceError, storage::UserStore};

/// Business operations on users, layered over a [`UserStore`].
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create a user after trimming the name; blank names are a validation error.
    pub async fn create_user(&self, name: &str) -> Result<User, ServiceError> {
        let name = user::normalize_name(name)?;
        let created = self.store.create(name).await;
        info!(event = "user_created", user_id = created.id, "user created");
        Ok(created)
    }

    /// Get a user by id.
    pub async fn get_user(&self, id: UserId) -> Result<User, ServiceError> {
        match self.store.get(id).await {
            Some(u) => Ok(u),
            None => {
                debug!(event = "user_missing", user_id = id, "user lookup missed");
                Err(ServiceError::not_found("user"))
            }
        }
    }

    /// Delete a user; a missing id is reported as not found.
    pub async fn delete_user(&self, id: UserId) -> Result<(), ServiceError> {
        if !self.store.delete(id).await {
            debug!(event = "user_missing", user_id = id, "delete of unknown user");
            return Err(ServiceError::not_found("user"));
        }
        info!(event = "user_deleted", user_id = id, "user deleted");
        Ok(())
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.store.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryUserStore;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserStore::new()))
    }

    #[tokio::test]
    async fn create_trims_name() -> Result<(), anyhow::Error> {
        let svc = service();
        let u = svc.create_user("  Ada  ").await?;
        assert_eq!(u.name, "Ada");
        assert_eq!(svc.get_user(u.id).await?.name, "Ada");
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_validation_error_and_stores_nothing() {
        let svc = service();
        let err = svc.create_user("   ").await.unwrap_err();
        assert_eq!(err, ServiceError::Validation(vec!["name is required".into()]));
        assert!(svc.list_users().await.is_empty());

        // a rejected create does not consume an id
        let u = svc.create_user("Bob").await.unwrap();
        assert_eq!(u.id, 1);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let svc = service();
        assert!(matches!(svc.get_user(42).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_user(42).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> Result<(), anyhow::Error> {
        let svc = service();
        let u = svc.create_user("Linus").await?;
        svc.delete_user(u.id).await?;
        assert!(matches!(svc.get_user(u.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_user(u.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_passes_through() -> Result<(), anyhow::Error> {
        let svc = service();
        svc.create_user("a").await?;
        svc.create_user("b").await?;
        let mut names: Vec<_> = svc.list_users().await.into_iter().map(|u| u.name).collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
        Ok(())
    }
}
