//! The filter pipeline: constrain the catalog, enrich, sort by date.

use common::{Warning, Warnings};
use domain::{Catalog, CatalogItem, PlayEvent, RequestEvent};
use serde::Serialize;

use crate::criteria::{FilterCriteria, Selection};
use crate::sort::sort_by_date_desc;
use crate::views::{EnrichmentView, ResultTable};

/// Result of one filter run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOutcome {
    pub table: ResultTable,
    /// Catalog rows that passed the filters. The table can hold more rows when
    /// the enrichment join fans out.
    pub row_count: usize,
    pub warnings: Warnings,
}

/// Applies `criteria` to the catalog and enriches the survivors.
///
/// Constraints apply in a fixed order: year, difficulty, date, language,
/// gender, tabber, source, then artist type. A malformed range is skipped with
/// a warning and the remaining constraints still apply. An active range
/// excludes rows whose value is unknown.
///
/// The returned table is ordered by date, most recent first.
#[tracing::instrument(skip_all, fields(catalog = catalog.len()))]
pub fn filter_catalog(
    catalog: &Catalog,
    criteria: &FilterCriteria,
    plays: &[PlayEvent],
    requests: &[RequestEvent],
) -> FilterOutcome {
    metrics::counter!("tabdb_filter_runs_total").increment(1);

    let mut warnings = Warnings::new();
    let mut items: Vec<&CatalogItem> = catalog.iter().collect();

    if let Some((start, end)) = criteria.year_bounds(&mut warnings) {
        items.retain(|item| item.year.is_some_and(|year| (start..=end).contains(&year)));
    }
    if let Some((min, max)) = criteria.difficulty_bounds(&mut warnings) {
        items.retain(|item| item.difficulty.is_some_and(|d| (min..=max).contains(&d)));
    }
    if let Some((start, end)) = criteria.date_bounds(&mut warnings) {
        items.retain(|item| item.date.is_some_and(|date| (start..=end).contains(&date)));
    }

    retain_selected(&mut items, &criteria.languages, |item| &item.language);
    retain_selected(&mut items, &criteria.genders, |item| &item.gender);
    retain_selected(&mut items, &criteria.tabbers, |item| &item.tabber);
    retain_selected(&mut items, &criteria.sources, |item| &item.source);

    if let Some(artist_type) = criteria.artist_type {
        items.retain(|item| item.artist_type == Some(artist_type));
    }

    let row_count = items.len();
    if row_count == 0 {
        warnings.push(Warning::EmptyResult);
    }

    let view = EnrichmentView::new(plays, requests);
    let mut rows = view.enrich_all(items);
    sort_by_date_desc(&mut rows);

    tracing::info!(row_count, rows = rows.len(), "filter applied");

    FilterOutcome {
        table: ResultTable::new(catalog.columns(), rows),
        row_count,
        warnings,
    }
}

fn retain_selected(
    items: &mut Vec<&CatalogItem>,
    selection: &Selection,
    field: impl Fn(&CatalogItem) -> &Option<String>,
) {
    if selection.is_unrestricted() {
        return;
    }
    items.retain(|item| selection.matches(field(item).as_deref()));
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use common::SongKey;
    use domain::{ArtistType, PlayRecord, Requester, columns};

    use super::*;
    use crate::criteria::ALL;

    fn item(song: &str, year: Option<i64>, gender: &str, day: u32) -> CatalogItem {
        let mut item = CatalogItem::new(SongKey::new(song, "Artist"));
        item.year = year;
        item.gender = Some(gender.to_string());
        item.date = NaiveDate::from_ymd_opt(2024, 1, day);
        item.difficulty = Some(f64::from(day));
        item.artist_type = Some(if day % 2 == 0 {
            ArtistType::Group
        } else {
            ArtistType::Person
        });
        item
    }

    fn catalog() -> Catalog {
        Catalog::new(
            columns::REQUIRED_CATALOG.iter().map(|c| c.to_string()).collect(),
            vec![
                item("A", Some(2005), "female", 1),
                item("B", Some(1995), "female", 2),
                item("C", None, "male", 3),
                item("D", Some(2010), "male", 4),
            ],
        )
    }

    fn songs(outcome: &FilterOutcome) -> Vec<&str> {
        outcome
            .table
            .rows()
            .iter()
            .map(|r| r.item.key.song())
            .collect()
    }

    #[test]
    fn test_no_constraints_returns_whole_catalog_by_date_desc() {
        let outcome = filter_catalog(&catalog(), &FilterCriteria::new(), &[], &[]);

        assert_eq!(outcome.row_count, 4);
        assert_eq!(songs(&outcome), vec!["D", "C", "B", "A"]);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_year_and_gender_combine() {
        let criteria = FilterCriteria::new()
            .year_range("2000", "2010")
            .genders(["female"]);
        let outcome = filter_catalog(&catalog(), &criteria, &[], &[]);

        assert_eq!(songs(&outcome), vec!["A"]);
        assert_eq!(outcome.row_count, 1);
    }

    #[test]
    fn test_active_range_excludes_unknown_values() {
        let criteria = FilterCriteria::new().year_range("1900", "2100");
        let outcome = filter_catalog(&catalog(), &criteria, &[], &[]);
        assert!(!songs(&outcome).contains(&"C"));
        assert_eq!(outcome.row_count, 3);
    }

    #[test]
    fn test_malformed_range_is_skipped_but_others_apply() {
        let criteria = FilterCriteria::new()
            .year_range("then", "now")
            .genders(["male"]);
        let outcome = filter_catalog(&catalog(), &criteria, &[], &[]);

        assert_eq!(songs(&outcome), vec!["D", "C"]);
        assert_eq!(outcome.warnings.count_kind("filter_input"), 1);
    }

    #[test]
    fn test_all_sentinel_is_a_no_op() {
        let criteria = FilterCriteria::new().genders([ALL]).languages(Vec::<String>::new());
        let outcome = filter_catalog(&catalog(), &criteria, &[], &[]);
        assert_eq!(outcome.row_count, 4);
    }

    #[test]
    fn test_artist_type_and_ranges_narrow() {
        let criteria = FilterCriteria::new()
            .difficulty_range("2", "4")
            .date_range("2024-01-01", "2024-01-03")
            .artist_type(ArtistType::Group);
        let outcome = filter_catalog(&catalog(), &criteria, &[], &[]);
        assert_eq!(songs(&outcome), vec!["B"]);
    }

    #[test]
    fn test_empty_result_is_a_warning_not_an_error() {
        let criteria = FilterCriteria::new().tabbers(["Nobody"]);
        let outcome = filter_catalog(&catalog(), &criteria, &[], &[]);

        assert!(outcome.table.is_empty());
        assert_eq!(outcome.row_count, 0);
        assert_eq!(outcome.warnings.count_kind("empty_result"), 1);
        assert_eq!(outcome.table.columns().len(), 14);
    }

    #[test]
    fn test_survivors_are_enriched() {
        let key = SongKey::new("A", "Artist");
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let plays = vec![PlayEvent::from_record(
            PlayRecord::new(key.clone(), Some(day), Some(5.0)),
            1,
        )];
        let requests = vec![RequestEvent::new(key, day, Requester::from_code("G"))];

        let outcome = filter_catalog(&catalog(), &FilterCriteria::new(), &plays, &requests);
        let a = outcome
            .table
            .rows()
            .iter()
            .find(|r| r.item.key.song() == "A")
            .unwrap();

        assert_eq!(a.session_order, Some(1));
        assert_eq!(a.requested_by, Some(Requester::Group));
    }
}
