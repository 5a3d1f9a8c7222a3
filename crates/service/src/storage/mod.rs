//! Storage abstractions for the service layer.
//!
//! Stores return plain presence signals (`Option`, `bool`); turning those into
//! domain errors is the service's job.

use async_trait::async_trait;
use models::user::{User, UserId};

pub mod memory;

/// Trait abstraction for user record storage.
///
/// Implementations must be safe to share across tasks: reads may run
/// concurrently, writes exclude everything else.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Assign the next id, stamp the creation time and insert. `name` is expected to be validated.
    async fn create(&self, name: String) -> User;
    async fn get(&self, id: UserId) -> Option<User>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: UserId) -> bool;
    /// All current records, in no particular order.
    async fn list(&self) -> Vec<User>;
}
