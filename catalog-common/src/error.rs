//! Common error types for the record catalog

use thiserror::Error;

/// Common result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the catalog crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stored or submitted value that cannot be interpreted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Self {
        Error::InvalidInput(format!("malformed identity: {}", err))
    }
}
