//! Error types for the weekmeet ecosystem.

use thiserror::Error;

/// Errors that can occur in weekmeet operations.
#[derive(Error, Debug)]
pub enum WeekmeetError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for weekmeet operations.
pub type WeekmeetResult<T> = Result<T, WeekmeetError>;
