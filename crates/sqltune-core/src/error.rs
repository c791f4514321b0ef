//! Error types for sqltune

use thiserror::Error;

/// Core error type for sqltune operations
#[derive(Error, Debug)]
pub enum TuneError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl TuneError {
    /// Returns true if the error means the session could not be opened or was lost
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type alias for sqltune operations
pub type Result<T> = std::result::Result<T, TuneError>;
