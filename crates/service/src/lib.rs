//! Service layer for the users resource.
//! - `storage` owns the records and hands out ids.
//! - `user_service` validates input and turns store signals into `ServiceError`s.
//! - Nothing here knows about HTTP.

pub mod errors;
pub mod storage;
pub mod user_service;

pub use errors::ServiceError;
pub use storage::{memory::InMemoryUserStore, UserStore};
pub use user_service::UserService;
