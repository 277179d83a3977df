//! Error types shared across the eqstat workspace

use thiserror::Error;

/// Result type alias for eqstat operations
pub type Result<T> = std::result::Result<T, EqstatError>;

/// Main error type for eqstat
#[derive(Error, Debug)]
pub enum EqstatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
