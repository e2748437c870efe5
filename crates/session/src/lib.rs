//! Session layer of the tab database.
//!
//! A [`Session`] holds the one active snapshot and the current filter result,
//! and exposes load, refresh, merge, filter and sort on top of them. The
//! `tabdb` binary drives a session from the command line.

pub mod cli;
pub mod config;
pub mod error;

pub use config::{Config, LogFormat};
pub use error::{Result, SessionError};

use ingest::{Snapshot, Sources};
use projections::stats::Summary;
use projections::{
    FilterCriteria, FilterOutcome, ReconciliationTable, ReconciliationView, ResultTable,
    SortDirection,
};

/// The single active working state.
///
/// Operations run one at a time through `&mut self`. Loading or refreshing
/// discards the previous snapshot and filter result before anything else
/// happens, so a failed load leaves the session empty rather than stale.
#[derive(Debug, Default)]
pub struct Session {
    snapshot: Option<Snapshot>,
    current: Option<FilterOutcome>,
}

impl Session {
    /// Creates a session with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the session's data with a fresh load of `sources`.
    pub fn load(&mut self, sources: Sources, required_columns: &[&str]) -> Result<&Snapshot> {
        self.refresh();
        let snapshot = ingest::load(sources, required_columns)?;
        Ok(self.snapshot.insert(snapshot))
    }

    /// Discards the snapshot and the current filter result.
    pub fn refresh(&mut self) {
        if self.snapshot.take().is_some() {
            tracing::info!("snapshot discarded");
        }
        self.current = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    /// The loaded snapshot.
    pub fn snapshot(&self) -> Result<&Snapshot> {
        self.snapshot.as_ref().ok_or(SessionError::NoDataLoaded)
    }

    /// Merges both event logs per song over the whole history.
    #[tracing::instrument(skip(self))]
    pub fn merge_all(&self) -> Result<ReconciliationTable> {
        let snapshot = self.snapshot()?;
        Ok(ReconciliationView::build(
            &snapshot.plays,
            &snapshot.requests,
        ))
    }

    /// Filters the catalog and keeps the outcome as the current result.
    #[tracing::instrument(skip_all)]
    pub fn filter(&mut self, criteria: &FilterCriteria) -> Result<&FilterOutcome> {
        let snapshot = self.snapshot.as_ref().ok_or(SessionError::NoDataLoaded)?;
        let outcome = projections::filter_catalog(
            &snapshot.catalog,
            criteria,
            &snapshot.plays,
            &snapshot.requests,
        );
        Ok(self.current.insert(outcome))
    }

    /// The result of the last filter, if any.
    pub fn current_result(&self) -> Option<&FilterOutcome> {
        self.current.as_ref()
    }

    /// Re-sorts the current result in place.
    ///
    /// Fails with [`SessionError::NoFilteredResult`] when there is no result or
    /// it has no rows.
    #[tracing::instrument(skip(self))]
    pub fn sort(&mut self, column: Option<&str>, direction: SortDirection) -> Result<&ResultTable> {
        self.snapshot()?;
        let current = self
            .current
            .as_mut()
            .filter(|outcome| !outcome.table.is_empty())
            .ok_or(SessionError::NoFilteredResult)?;
        projections::sort_in_place(&mut current.table, column, direction)?;
        Ok(&current.table)
    }

    /// Choices for a categorical filter: the distinct values of a catalog column.
    pub fn distinct_values(&self, column: &str) -> Result<Vec<String>> {
        Ok(self.snapshot()?.catalog.distinct_values(column))
    }

    /// Summary statistics of the current result.
    pub fn summary(&self, bins: usize) -> Result<Summary> {
        self.snapshot()?;
        let current = self.current.as_ref().ok_or(SessionError::NoFilteredResult)?;
        Ok(Summary::of(&current.table, bins))
    }
}

#[cfg(test)]
mod tests {
    use domain::columns;
    use ingest::SourceName;

    use super::*;

    const CATALOG: &str = "\
song,artist,year,type,gender,duration,language,tabber,source,date,difficulty,specialbooks
A,X,2005,Person,female,00:03:00,english,Bea,new,20240101,2,
B,Y,1995,Group,male,00:04:00,french,Joh,old,20240102,4,
";

    fn sources() -> Sources {
        Sources::new()
            .csv(SourceName::Catalog, CATALOG)
            .csv(SourceName::Plays, "song,artist,20240101\nA,X,1\n")
            .csv(SourceName::Requests, "song,artist,20240101\nA,X,G\n")
    }

    fn loaded() -> Session {
        let mut session = Session::new();
        session.load(sources(), &columns::REQUIRED_CATALOG).unwrap();
        session
    }

    #[test]
    fn test_operations_before_load_fail() {
        let mut session = Session::new();
        assert!(matches!(session.merge_all(), Err(SessionError::NoDataLoaded)));
        assert!(matches!(
            session.filter(&FilterCriteria::new()),
            Err(SessionError::NoDataLoaded)
        ));
        assert!(matches!(
            session.sort(Some("year"), SortDirection::Ascending),
            Err(SessionError::NoDataLoaded)
        ));
    }

    #[test]
    fn test_refresh_discards_everything() {
        let mut session = loaded();
        session.filter(&FilterCriteria::new()).unwrap();

        session.refresh();

        assert!(!session.is_loaded());
        assert!(session.current_result().is_none());
        assert!(matches!(
            session.distinct_values("gender"),
            Err(SessionError::NoDataLoaded)
        ));
    }

    #[test]
    fn test_failed_load_leaves_session_empty() {
        let mut session = loaded();
        let result = session.load(
            Sources::new().csv(SourceName::Catalog, CATALOG),
            &columns::REQUIRED_CATALOG,
        );

        assert!(matches!(result, Err(SessionError::Load(_))));
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_sort_needs_a_non_empty_result() {
        let mut session = loaded();
        assert!(matches!(
            session.sort(Some("year"), SortDirection::Ascending),
            Err(SessionError::NoFilteredResult)
        ));

        session
            .filter(&FilterCriteria::new().tabbers(["Nobody"]))
            .unwrap();
        assert!(matches!(
            session.sort(Some("year"), SortDirection::Ascending),
            Err(SessionError::NoFilteredResult)
        ));
    }

    #[test]
    fn test_sort_replaces_current_order() {
        let mut session = loaded();
        session.filter(&FilterCriteria::new()).unwrap();

        let table = session.sort(Some("year"), SortDirection::Ascending).unwrap();
        let songs: Vec<_> = table.rows().iter().map(|r| r.item.key.song()).collect();
        assert_eq!(songs, vec!["B", "A"]);

        let current = session.current_result().unwrap();
        assert_eq!(current.table.rows()[0].item.key.song(), "B");
    }

    #[test]
    fn test_sort_without_column_is_a_projection_error() {
        let mut session = loaded();
        session.filter(&FilterCriteria::new()).unwrap();
        assert!(matches!(
            session.sort(None, SortDirection::Ascending),
            Err(SessionError::Projection(
                projections::ProjectionError::NoColumnSelected
            ))
        ));
    }

    #[test]
    fn test_summary_and_options_use_the_session_data() {
        let mut session = loaded();
        assert_eq!(
            session.distinct_values("language").unwrap(),
            vec!["english", "french"]
        );

        session.filter(&FilterCriteria::new()).unwrap();
        let summary = session.summary(5).unwrap();
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.duration_minutes.len(), 2);
    }
}
