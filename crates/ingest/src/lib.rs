//! Loading side of the tab database.
//!
//! This crate turns the three spreadsheet exports into a validated
//! [`Snapshot`]:
//! - [`RawTable`] reads CSV text into named, possibly-empty cells
//! - [`load`] validates the catalog schema and coerces its typed columns
//! - [`transform`] pivots the wide play and request logs into long records
//! - [`ordering`] ranks plays within each session date

pub mod error;
pub mod loader;
pub mod ordering;
pub mod snapshot;
pub mod source;
pub mod table;
pub mod transform;

pub use error::{LoadError, Result, TransformError};
pub use loader::load;
pub use snapshot::Snapshot;
pub use source::{SourceHandle, SourceName, Sources};
pub use table::RawTable;
