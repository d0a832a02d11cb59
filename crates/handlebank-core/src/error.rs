//! Error types for handlebank-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in handlebank-core
#[derive(Debug, Error)]
pub enum Error {
    /// Attempt to store an object under an empty id
    #[error("Object id must not be empty")]
    EmptyId,

    /// No object in the repository with the given id
    #[error("No object in repository with id '{0}'")]
    NotFound(String),
}
