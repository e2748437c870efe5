//! Read model trait for query-side views.

/// A materialized query result handed to collaborators.
///
/// Read models are rebuilt on every query; nothing is cached between calls.
pub trait ReadModel {
    /// Returns the name of this read model.
    fn name(&self) -> &'static str;

    /// Returns the number of rows in this read model.
    fn count(&self) -> usize;

    /// Returns true if the read model has no rows.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
