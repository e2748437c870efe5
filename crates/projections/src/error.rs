//! Projection error types.

use thiserror::Error;

/// Errors that can occur while querying a snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    /// A sort was requested without naming a column.
    #[error("no column selected to sort by")]
    NoColumnSelected,

    /// The sort column is not part of the result table.
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
