//! Correlation, filtering and sorting over a loaded snapshot.
//!
//! This crate provides the query side of the tab database:
//! - [`FilterCriteria`] for range, multi-select and exact-match constraints
//! - [`filter_catalog`] for the fixed filter → enrich → date-sort pipeline
//! - [`sort`] for re-sorting a result table by any column
//! - Two correlation views: [`EnrichmentView`] (same-date left join used by
//!   filtering) and [`ReconciliationView`] (identity-only outer join)
//! - [`stats`] for the summaries behind the charts

pub mod criteria;
pub mod error;
pub mod filter;
pub mod read_model;
pub mod sort;
pub mod stats;
pub mod views;

pub use criteria::{FilterCriteria, RangeInput, Selection};
pub use error::{ProjectionError, Result};
pub use filter::{FilterOutcome, filter_catalog};
pub use read_model::ReadModel;
pub use sort::{SortDirection, sort, sort_in_place};
pub use views::{
    ColumnSpec, EnrichedRecord, EnrichmentView, Field, FieldShape, ReconciledRow,
    ReconciliationTable, ReconciliationView, ResultTable,
};
