//! Session error types.

use ingest::LoadError;
use projections::ProjectionError;
use thiserror::Error;

/// Errors returned by session operations.
///
/// None of them invalidates the session: after an error the caller can keep
/// issuing operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No snapshot is loaded, or it was discarded by a refresh.
    #[error("no data loaded: load the sources first")]
    NoDataLoaded,

    /// There is no non-empty filter result to work on.
    #[error("no filtered data: run a filter that returns rows first")]
    NoFilteredResult,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// A result could not be rendered as JSON.
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
