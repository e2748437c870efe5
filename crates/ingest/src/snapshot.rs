use common::Warnings;
use domain::{Catalog, PlayEvent, RequestEvent};

/// Everything produced by one successful load.
///
/// A snapshot is rebuilt from the sources on every load; nothing carries over
/// between snapshots.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// The validated, coerced catalog.
    pub catalog: Catalog,

    /// Plays in session order: by date, then rank within the date.
    pub plays: Vec<PlayEvent>,

    /// Requests in pivot order.
    pub requests: Vec<RequestEvent>,

    /// Coercion and identity warnings raised while loading.
    pub warnings: Warnings,
}

impl Snapshot {
    /// Creates a snapshot without warnings.
    pub fn new(catalog: Catalog, plays: Vec<PlayEvent>, requests: Vec<RequestEvent>) -> Self {
        Self {
            catalog,
            plays,
            requests,
            warnings: Warnings::new(),
        }
    }

    /// Attaches the warnings raised while building this snapshot.
    pub fn with_warnings(mut self, warnings: Warnings) -> Self {
        self.warnings = warnings;
        self
    }
}
