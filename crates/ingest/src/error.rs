use thiserror::Error;

use crate::SourceName;

/// A structural problem found while pivoting a wide event log.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The identity columns are absent from the wide table.
    #[error("missing identity columns: {}", .0.join(", "))]
    MissingIdentityColumns(Vec<String>),

    /// A column holding values is not labelled with a `YYYYMMDD` date.
    #[error("column label {label:?} is not a YYYYMMDD date")]
    UnparseableDate { label: String },
}

/// Errors that abort a load. No partial snapshot survives any of them.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No handle, or an empty one, was supplied for a source.
    #[error("no data supplied for {0}")]
    MissingSource(SourceName),

    /// The catalog lacks required columns. Lists every missing column.
    #[error("{source_name} is missing required columns: {}", .missing.join(", "))]
    Schema {
        source_name: SourceName,
        missing: Vec<String>,
    },

    /// The wide-to-long pivot of an event log failed.
    #[error("cannot transform {source_name}: {error}")]
    Transform {
        source_name: SourceName,
        #[source]
        error: TransformError,
    },

    /// The source could not be opened or parsed as CSV.
    #[error("cannot read {source_name}: {error}")]
    Read {
        source_name: SourceName,
        #[source]
        error: csv::Error,
    },
}

impl LoadError {
    /// The source this error concerns.
    pub fn source_name(&self) -> SourceName {
        match self {
            LoadError::MissingSource(name) => *name,
            LoadError::Schema { source_name, .. }
            | LoadError::Transform { source_name, .. }
            | LoadError::Read { source_name, .. } => *source_name,
        }
    }
}

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;
