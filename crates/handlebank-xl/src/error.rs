//! Error types for handlebank-xl

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in handlebank-xl
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the underlying object repository
    #[error(transparent)]
    Core(#[from] handlebank_core::Error),

    /// Same handle stub registered from two different calling ranges
    #[error(
        "Cannot create object with id '{id}' in cell {new_caller} \
         because an object with that id already resides in cell {old_caller}"
    )]
    HandleConflict {
        id: String,
        new_caller: String,
        old_caller: String,
    },

    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Query argument is not a recognized range reference
    #[error("Input parameter is not a range reference: {0}")]
    InvalidRangeReference(String),

    /// The host reported a defined name the tracker does not know about
    #[error("No calling range named '{0}'")]
    NameNotFound(String),

    /// Worksheet function registered twice under the same code name
    #[error("Function '{0}' is already registered")]
    DuplicateFunction(String),
}
