//! Error types for quorum-core

use thiserror::Error;

/// Result type alias using quorum-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quorum-core store and auth operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Valid credentials but insufficient privilege
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// No record matching id and scope
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
