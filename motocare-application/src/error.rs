use motocare_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<DomainError> for AppError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::NotFound(_) => AppError::NotFound(value.to_string()),
            DomainError::InvalidInput(_) | DomainError::DuplicateItem(_) => {
                AppError::BadRequest(value.to_string())
            }
        }
    }
}
