//! Error types for handlebank-models

use thiserror::Error;

/// Result type alias using [`ModelError`]
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised by model constructors
#[derive(Debug, Error)]
pub enum ModelError {
    /// Rate times vector must not be empty
    #[error("rate times vector is empty")]
    EmptyRateTimes,

    /// Parameter outside its admissible range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Reduced-rank factor count exceeds model size
    #[error("factor count {factors} exceeds model size {size}")]
    TooManyFactors { factors: usize, size: usize },

    /// Correlation matrix has the wrong shape
    #[error("correlation matrix is {rows}x{cols}, expected {expected}x{expected}")]
    MatrixShape {
        rows: usize,
        cols: usize,
        expected: usize,
    },

    /// Historical series must contain observations
    #[error("historical series is empty")]
    EmptySeries,

    /// Observation rows must all have the same width
    #[error("observation {index} has {len} entries, expected {expected}")]
    RaggedSeries {
        index: usize,
        len: usize,
        expected: usize,
    },
}
