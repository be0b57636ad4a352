use thiserror::Error;
use uuid::Uuid;

use crate::domain::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),
    #[error("ad not found: {0}")]
    AdNotFound(Uuid),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::UserNotFound(_) | DomainError::AdNotFound(_))
    }

    /// Field names of a validation failure, empty for every other kind.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        match self {
            DomainError::Validation(errors) => errors.fields(),
            _ => Vec::new(),
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Storage(format!("serialization error: {}", err))
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Storage(format!("io error: {}", err))
    }
}
