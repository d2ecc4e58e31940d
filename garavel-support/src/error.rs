// Error types for the support helpers

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SupportError {
    #[error("Element {index} has no field `{field}`")]
    MissingField { index: String, field: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SupportError>;
