//! Reconciliation view: both event logs merged per song across all dates.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use common::{CellValue, SongKey};
use domain::{PlayEvent, RequestEvent, Requester, columns};
use serde::Serialize;

use crate::read_model::ReadModel;

/// Whether a merged column holds one value or a list of values per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldShape {
    Scalar,
    List,
}

/// Name and shape of a reconciliation column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub shape: FieldShape,
}

/// A cell of a reconciliation row, tagged with its shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Scalar(CellValue),
    List(Vec<CellValue>),
}

/// Everything the logs recorded for one song.
///
/// Lists never contain missing values. `dates` holds the play dates followed by
/// the request dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledRow {
    #[serde(flatten)]
    pub key: SongKey,
    #[serde(rename = "date")]
    pub dates: Vec<NaiveDate>,
    #[serde(rename = "play_order")]
    pub play_orders: Vec<f64>,
    #[serde(rename = "order_of_song_played")]
    pub session_orders: Vec<u32>,
    pub requested_by: Vec<Requester>,
}

impl ReconciledRow {
    fn new(key: SongKey) -> Self {
        Self {
            key,
            dates: Vec::new(),
            play_orders: Vec::new(),
            session_orders: Vec::new(),
            requested_by: Vec::new(),
        }
    }

    /// Returns a column's cell with the shape declared in [`ReconciliationTable::COLUMNS`].
    pub fn field(&self, column: &str) -> Option<Field> {
        let list = |values: Vec<CellValue>| Some(Field::List(values));
        match column {
            columns::SONG => Some(Field::Scalar(CellValue::from(self.key.song()))),
            columns::ARTIST => Some(Field::Scalar(CellValue::from(self.key.artist()))),
            columns::DATE => list(self.dates.iter().copied().map(CellValue::Date).collect()),
            columns::PLAY_ORDER => list(
                self.play_orders
                    .iter()
                    .copied()
                    .map(CellValue::Number)
                    .collect(),
            ),
            columns::SESSION_ORDER => list(
                self.session_orders
                    .iter()
                    .map(|o| CellValue::Integer(i64::from(*o)))
                    .collect(),
            ),
            columns::REQUESTED_BY => list(
                self.requested_by
                    .iter()
                    .map(|r| CellValue::from(r.as_str()))
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// One row per song appearing in either log, ordered by song then artist.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconciliationTable {
    rows: Vec<ReconciledRow>,
}

impl ReconciliationTable {
    /// Column layout: identity columns are scalars, everything else is a list.
    pub const COLUMNS: [ColumnSpec; 6] = [
        ColumnSpec {
            name: columns::SONG,
            shape: FieldShape::Scalar,
        },
        ColumnSpec {
            name: columns::ARTIST,
            shape: FieldShape::Scalar,
        },
        ColumnSpec {
            name: columns::DATE,
            shape: FieldShape::List,
        },
        ColumnSpec {
            name: columns::PLAY_ORDER,
            shape: FieldShape::List,
        },
        ColumnSpec {
            name: columns::SESSION_ORDER,
            shape: FieldShape::List,
        },
        ColumnSpec {
            name: columns::REQUESTED_BY,
            shape: FieldShape::List,
        },
    ];

    pub fn columns(&self) -> &'static [ColumnSpec] {
        &Self::COLUMNS
    }

    pub fn rows(&self) -> &[ReconciledRow] {
        &self.rows
    }

    /// Finds the row of a song.
    pub fn get(&self, key: &SongKey) -> Option<&ReconciledRow> {
        self.rows
            .binary_search_by(|row| row.key.cmp(key))
            .ok()
            .map(|i| &self.rows[i])
    }
}

impl ReadModel for ReconciliationTable {
    fn name(&self) -> &'static str {
        "ReconciliationTable"
    }

    fn count(&self) -> usize {
        self.rows.len()
    }
}

/// Outer join of the play and request logs on song identity alone.
pub struct ReconciliationView;

impl ReconciliationView {
    /// Merges the logs. Play values come before request values in every list;
    /// within a log, values keep the log's order.
    #[tracing::instrument(skip_all, fields(plays = plays.len(), requests = requests.len()))]
    pub fn build(plays: &[PlayEvent], requests: &[RequestEvent]) -> ReconciliationTable {
        let mut rows: BTreeMap<&SongKey, ReconciledRow> = BTreeMap::new();

        for play in plays {
            let row = rows
                .entry(&play.key)
                .or_insert_with(|| ReconciledRow::new(play.key.clone()));
            row.dates.extend(play.date);
            row.play_orders.extend(play.play_order);
            row.session_orders.push(play.session_order);
        }

        for request in requests {
            let row = rows
                .entry(&request.key)
                .or_insert_with(|| ReconciledRow::new(request.key.clone()));
            row.dates.push(request.date);
            row.requested_by.push(request.requested_by.clone());
        }

        tracing::debug!(songs = rows.len(), "logs reconciled");

        ReconciliationTable {
            rows: rows.into_values().collect(),
        }
    }
}
