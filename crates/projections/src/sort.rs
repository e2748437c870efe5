//! Column sort over a result table.

use std::str::FromStr;

use common::{CellValue, compare_missing_last};
use domain::columns;
use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};
use crate::views::{EnrichedRecord, ResultTable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn is_descending(self) -> bool {
        self == SortDirection::Descending
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

/// Sorts a result table by one column.
///
/// The sort is stable and replaces any previous order. Missing values go last
/// in both directions.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn sort(
    mut table: ResultTable,
    column: Option<&str>,
    direction: SortDirection,
) -> Result<ResultTable> {
    sort_in_place(&mut table, column, direction)?;
    Ok(table)
}

/// In-place form of [`sort`]. The table is untouched on error.
pub fn sort_in_place(
    table: &mut ResultTable,
    column: Option<&str>,
    direction: SortDirection,
) -> Result<()> {
    let column = match column.map(str::trim) {
        Some(column) if !column.is_empty() => column,
        _ => return Err(ProjectionError::NoColumnSelected),
    };
    if !table.has_column(column) {
        return Err(ProjectionError::UnknownColumn(column.to_string()));
    }

    sort_rows_by(table.rows_mut(), column, direction.is_descending());
    Ok(())
}

/// Default order of a fresh filter result: most recent date first.
pub(crate) fn sort_by_date_desc(rows: &mut Vec<EnrichedRecord>) {
    sort_rows_by(rows, columns::DATE, true);
}

fn sort_rows_by(rows: &mut Vec<EnrichedRecord>, column: &str, descending: bool) {
    // Each key is computed once; `sort_by` is stable.
    let mut keyed: Vec<(Option<CellValue>, EnrichedRecord)> = rows
        .drain(..)
        .map(|row| (row.value(column), row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_missing_last(a.as_ref(), b.as_ref(), descending));
    rows.extend(keyed.into_iter().map(|(_, row)| row));
}
