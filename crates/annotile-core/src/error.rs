//! Error types for Annotile.

use thiserror::Error;

/// Main error type for Annotile operations.
#[derive(Error, Debug)]
pub enum AnnotileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Frame {id} out of range (dataset holds {count} frames)")]
    IndexOutOfRange { id: u64, count: u64 },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Annotile operations.
pub type Result<T> = std::result::Result<T, AnnotileError>;
