//! Correlation views over the catalog and the event logs.

pub mod enrichment;
pub mod reconciliation;

pub use enrichment::{EnrichedRecord, EnrichmentView, ResultTable};
pub use reconciliation::{
    ColumnSpec, Field, FieldShape, ReconciledRow, ReconciliationTable, ReconciliationView,
};
