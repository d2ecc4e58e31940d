// Error types for the HTTP services

use garavel_facades::FacadeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HttpError {
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Invalid status code: {0}")]
    InvalidStatus(i64),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<HttpError> for FacadeError {
    fn from(err: HttpError) -> Self {
        FacadeError::Service(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HttpError>;
