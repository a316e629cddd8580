use crate::model::FieldKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RolodexError {
    #[error("Invalid {kind}: {reason}")]
    Validation { kind: FieldKind, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] postcard::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl RolodexError {
    pub fn validation(kind: FieldKind, reason: impl Into<String>) -> Self {
        RolodexError::Validation {
            kind,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RolodexError>;
