//! Common error types for the registration service

use thiserror::Error;

/// Common result type for store and configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by the store layer and configuration loading
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
}
