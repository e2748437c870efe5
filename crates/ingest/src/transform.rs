//! Wide-to-long pivot of the event logs.
//!
//! A wide log has the identity columns `song` and `artist` followed by any
//! number of columns labelled with a session date. Each non-empty cell
//! becomes one long record.

use common::coerce::{parse_compact_date, parse_number};
use common::{SongKey, Warning, Warnings};
use domain::{PlayRecord, Requester, RequestEvent, columns};

use crate::error::TransformError;
use crate::source::SourceName;
use crate::table::RawTable;

/// One non-empty cell of a wide table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongCell<'a> {
    /// 1-based data row the cell came from.
    pub row: usize,
    pub key: SongKey,
    pub label: &'a str,
    pub value: &'a str,
}

/// Pivots every non-identity column into `(identity, label, value)` cells.
///
/// Cells are produced column by column. Rows without a complete identity are
/// skipped with a [`Warning::MissingIdentity`].
pub fn melt<'a>(
    table: &'a RawTable,
    source: SourceName,
    warnings: &mut Warnings,
) -> Result<Vec<LongCell<'a>>, TransformError> {
    let (Some(song_col), Some(artist_col)) = (
        table.column_index(columns::SONG),
        table.column_index(columns::ARTIST),
    ) else {
        return Err(TransformError::MissingIdentityColumns(
            table.missing_columns(&columns::IDENTITY),
        ));
    };

    let keys: Vec<Option<SongKey>> = (0..table.row_count())
        .map(|row| {
            let key = SongKey::from_cells(table.cell(row, song_col), table.cell(row, artist_col));
            if key.is_none() {
                warnings.push(Warning::MissingIdentity {
                    table: source.to_string(),
                    row: row + 1,
                });
            }
            key
        })
        .collect();

    let mut cells = Vec::new();
    for (col, label) in table.headers().iter().enumerate() {
        if col == song_col || col == artist_col {
            continue;
        }
        for (row, key) in keys.iter().enumerate() {
            let (Some(key), Some(value)) = (key, table.cell(row, col)) else {
                continue;
            };
            cells.push(LongCell {
                row: row + 1,
                key: key.clone(),
                label: label.as_str(),
                value,
            });
        }
    }

    Ok(cells)
}

/// Converts the wide play log into play records.
///
/// Labels that are not dates yield records with an unknown date. Cells that
/// are not numbers yield an unknown play order and a coercion warning.
pub fn plays_to_long(
    table: &RawTable,
    warnings: &mut Warnings,
) -> Result<Vec<PlayRecord>, TransformError> {
    let source = SourceName::Plays;
    let cells = melt(table, source, warnings)?;

    Ok(cells
        .into_iter()
        .map(|cell| {
            let play_order = parse_number(cell.value);
            if play_order.is_none() {
                warnings.push(Warning::TypeCoercion {
                    table: source.to_string(),
                    row: cell.row,
                    column: cell.label.to_string(),
                    value: cell.value.to_string(),
                    expected: "numeric play order",
                });
            }
            PlayRecord::new(cell.key, parse_compact_date(cell.label), play_order)
        })
        .collect())
}

/// Converts the wide request log into request events.
///
/// Every request must be dated: a non-empty cell under a label that is not a
/// `YYYYMMDD` date fails the transform. Empty columns are never inspected.
pub fn requests_to_long(
    table: &RawTable,
    warnings: &mut Warnings,
) -> Result<Vec<RequestEvent>, TransformError> {
    let cells = melt(table, SourceName::Requests, warnings)?;

    cells
        .into_iter()
        .map(|cell| {
            let date = parse_compact_date(cell.label).ok_or_else(|| {
                TransformError::UnparseableDate {
                    label: cell.label.to_string(),
                }
            })?;
            Ok(RequestEvent::new(
                cell.key,
                date,
                Requester::from_code(cell.value),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_melt_emits_one_cell_per_non_empty_value() {
        let table = RawTable::from_csv_str(
            "song,artist,20240101,20240108\nA,X,1,\nB,Y,,2\nC,Z,,\n",
        )
        .unwrap();
        let mut warnings = Warnings::new();

        let cells = melt(&table, SourceName::Plays, &mut warnings).unwrap();

        let summary: Vec<_> = cells.iter().map(|c| (c.key.song(), c.label, c.value)).collect();
        assert_eq!(
            summary,
            vec![("A", "20240101", "1"), ("B", "20240108", "2")]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_melt_with_no_date_columns_is_empty() {
        let table = RawTable::from_csv_str("song,artist\nA,X\n").unwrap();
        let cells = melt(&table, SourceName::Plays, &mut Warnings::new()).unwrap();
        assert!(cells.is_empty());
    }

    #[test]
    fn test_melt_requires_identity_columns() {
        let table = RawTable::from_csv_str("title,20240101\nA,1\n").unwrap();
        let err = melt(&table, SourceName::Plays, &mut Warnings::new()).unwrap_err();
        assert_eq!(
            err,
            TransformError::MissingIdentityColumns(vec!["song".into(), "artist".into()])
        );
    }

    #[test]
    fn test_melt_skips_rows_without_identity() {
        let table = RawTable::from_csv_str("song,artist,20240101\n,X,1\nB,Y,2\n").unwrap();
        let mut warnings = Warnings::new();

        let cells = melt(&table, SourceName::Plays, &mut warnings).unwrap();

        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].row, 2);
        assert_eq!(warnings.count_kind("missing_identity"), 1);
    }

    #[test]
    fn test_plays_keep_undated_labels_with_unknown_date() {
        let table = RawTable::from_csv_str("song,artist,20240101,notes\nA,X,2,5\n").unwrap();
        let records = plays_to_long(&table, &mut Warnings::new()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, date(2024, 1, 1));
        assert_eq!(records[0].play_order, Some(2.0));
        assert_eq!(records[1].date, None);
        assert_eq!(records[1].play_order, Some(5.0));
    }

    #[test]
    fn test_non_numeric_play_order_is_a_warning() {
        let table = RawTable::from_csv_str("song,artist,20240101\nA,X,first\n").unwrap();
        let mut warnings = Warnings::new();

        let records = plays_to_long(&table, &mut warnings).unwrap();

        assert_eq!(records[0].play_order, None);
        assert_eq!(warnings.count_kind("type_coercion"), 1);
    }

    #[test]
    fn test_requests_normalize_codes() {
        let table =
            RawTable::from_csv_str("song,artist,20240101,20240102\nA,X,G,\nB,Y,,?\nC,Z,Bea,\n")
                .unwrap();
        let events = requests_to_long(&table, &mut Warnings::new()).unwrap();

        let summary: Vec<_> = events
            .iter()
            .map(|e| (e.key.song(), e.date, e.requested_by.to_string()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("A", date(2024, 1, 1).unwrap(), "Group".to_string()),
                ("C", date(2024, 1, 1).unwrap(), "Bea".to_string()),
                ("B", date(2024, 1, 2).unwrap(), "Unknown".to_string()),
            ]
        );
    }

    #[test]
    fn test_requests_under_undated_label_fail() {
        let table = RawTable::from_csv_str("song,artist,someday\nA,X,G\n").unwrap();
        let err = requests_to_long(&table, &mut Warnings::new()).unwrap_err();
        assert_eq!(
            err,
            TransformError::UnparseableDate {
                label: "someday".to_string()
            }
        );
    }

    #[test]
    fn test_empty_undated_request_column_is_ignored() {
        let table = RawTable::from_csv_str("song,artist,notes,20240101\nA,X,,A\n").unwrap();
        let events = requests_to_long(&table, &mut Warnings::new()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].requested_by, Requester::Audience);
    }
}
