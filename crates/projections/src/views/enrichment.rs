//! Enrichment view: catalog rows annotated with same-date play and request data.

use std::collections::HashMap;

use chrono::NaiveDate;
use common::{CellValue, SongKey};
use domain::{CatalogItem, PlayEvent, RequestEvent, Requester, columns};
use serde::Serialize;

use crate::read_model::ReadModel;

/// A catalog row with its session order and requester on the row's date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub item: CatalogItem,
    #[serde(rename = "order_of_song_played")]
    pub session_order: Option<u32>,
    pub requested_by: Option<Requester>,
}

impl EnrichedRecord {
    /// Returns the value of a column by name.
    pub fn value(&self, column: &str) -> Option<CellValue> {
        match column {
            columns::SESSION_ORDER => self.session_order.map(|o| CellValue::Integer(i64::from(o))),
            columns::REQUESTED_BY => self
                .requested_by
                .as_ref()
                .map(|r| CellValue::from(r.as_str())),
            other => self.item.value(other),
        }
    }
}

/// The table returned by a filter: catalog columns followed by the two
/// enrichment columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<EnrichedRecord>,
}

impl ResultTable {
    /// Creates a table for the given catalog columns; the enrichment columns
    /// are appended.
    pub fn new(catalog_columns: &[String], rows: Vec<EnrichedRecord>) -> Self {
        let mut columns = catalog_columns.to_vec();
        for extra in [columns::SESSION_ORDER, columns::REQUESTED_BY] {
            if !columns.iter().any(|c| c == extra) {
                columns.push(extra.to_string());
            }
        }
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn rows(&self) -> &[EnrichedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<EnrichedRecord> {
        &mut self.rows
    }
}

impl ReadModel for ResultTable {
    fn name(&self) -> &'static str {
        "ResultTable"
    }

    fn count(&self) -> usize {
        self.rows.len()
    }
}

type DateIndex<'a, T> = HashMap<&'a SongKey, HashMap<NaiveDate, Vec<&'a T>>>;

/// Index of plays and requests by song and date for the left join.
///
/// Plays with an unknown date are not indexed: an unknown date never matches.
pub struct EnrichmentView<'a> {
    plays: DateIndex<'a, PlayEvent>,
    requests: DateIndex<'a, RequestEvent>,
}

impl<'a> EnrichmentView<'a> {
    /// Indexes the event logs.
    pub fn new(plays: &'a [PlayEvent], requests: &'a [RequestEvent]) -> Self {
        let mut play_index: DateIndex<'a, PlayEvent> = HashMap::new();
        for play in plays {
            if let Some(date) = play.date {
                play_index
                    .entry(&play.key)
                    .or_default()
                    .entry(date)
                    .or_default()
                    .push(play);
            }
        }

        let mut request_index: DateIndex<'a, RequestEvent> = HashMap::new();
        for request in requests {
            request_index
                .entry(&request.key)
                .or_default()
                .entry(request.date)
                .or_default()
                .push(request);
        }

        Self {
            plays: play_index,
            requests: request_index,
        }
    }

    fn matches<'v, T>(index: &'v DateIndex<'a, T>, item: &CatalogItem) -> &'v [&'a T] {
        item.date
            .and_then(|date| index.get(&item.key)?.get(&date))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Left-joins one catalog row.
    ///
    /// Yields exactly one record unless the logs hold several events for the
    /// row's song and date; then every play × request combination is returned.
    pub fn enrich(&self, item: &CatalogItem) -> Vec<EnrichedRecord> {
        let plays = Self::matches(&self.plays, item);
        let requests = Self::matches(&self.requests, item);

        let session_orders: Vec<Option<u32>> = if plays.is_empty() {
            vec![None]
        } else {
            plays.iter().map(|p| Some(p.session_order)).collect()
        };
        let requesters: Vec<Option<&Requester>> = if requests.is_empty() {
            vec![None]
        } else {
            requests.iter().map(|r| Some(&r.requested_by)).collect()
        };

        let mut records = Vec::with_capacity(session_orders.len() * requesters.len());
        for session_order in &session_orders {
            for requested_by in &requesters {
                records.push(EnrichedRecord {
                    item: item.clone(),
                    session_order: *session_order,
                    requested_by: requested_by.cloned(),
                });
            }
        }

        if records.len() > 1 {
            tracing::warn!(
                song = %item.key,
                date = ?item.date,
                rows = records.len(),
                "duplicate events for one song and date, join fans out"
            );
            metrics::counter!("tabdb_enrichment_fanout_total").increment(records.len() as u64 - 1);
        }

        records
    }

    /// Left-joins every item, preserving input order.
    pub fn enrich_all<'i>(
        &self,
        items: impl IntoIterator<Item = &'i CatalogItem>,
    ) -> Vec<EnrichedRecord> {
        items.into_iter().flat_map(|item| self.enrich(item)).collect()
    }
}
