use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// One reason per field that failed.
    #[error("validation error: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(reason) => Self::Validation(vec![reason]),
        }
    }
}
