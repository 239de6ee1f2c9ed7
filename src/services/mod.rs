pub mod discovery;
pub mod vehicle;

use thiserror::Error;

use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
