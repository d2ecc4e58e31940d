// Error types for service resolution and dispatch

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FacadeError {
    #[error("Facade {0} does not configure an accessor")]
    UnconfiguredAccessor(&'static str),

    #[error("Service `{service}` does not support method `{method}`")]
    UnknownMethod { service: String, method: String },

    #[error("No service bound under `{0}`")]
    UnknownService(String),

    #[error("Service `{name}` holds {bound}, not {requested}")]
    ServiceTypeMismatch {
        name: String,
        bound: &'static str,
        requested: &'static str,
    },

    #[error("Invalid arguments for `{method}`: {reason}")]
    InvalidArguments { method: String, reason: String },

    #[error("Service error: {0}")]
    Service(String),
}

impl FacadeError {
    pub fn unknown_method(service: &str, method: &str) -> Self {
        FacadeError::UnknownMethod {
            service: service.to_string(),
            method: method.to_string(),
        }
    }

    pub fn invalid_arguments(method: &str, reason: impl Into<String>) -> Self {
        FacadeError::InvalidArguments {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FacadeError>;
