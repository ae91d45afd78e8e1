use crate::errors::repository::RepositoryError;
use crate::utils::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Custom error: {0}")]
    Custom(String),
}
