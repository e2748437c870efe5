//! Source loading and catalog validation.

use common::coerce::{parse_compact_date, parse_duration_secs, parse_integer, parse_number};
use common::{CellValue, SongKey, Warning, Warnings};
use domain::{ArtistType, Catalog, CatalogItem, columns};

use crate::error::{LoadError, Result};
use crate::ordering::assign_session_order;
use crate::snapshot::Snapshot;
use crate::source::{SourceName, Sources};
use crate::table::RawTable;
use crate::transform;

/// Loads all three sources into a fresh snapshot.
///
/// `required_columns` applies to the catalog only; the identity columns are
/// always required. Sources are processed in [`SourceName::ALL`] order and the
/// first failure aborts the whole load.
#[tracing::instrument(skip_all, fields(required = required_columns.len()))]
pub fn load(mut sources: Sources, required_columns: &[&str]) -> Result<Snapshot> {
    let mut warnings = Warnings::new();

    let table = read_source(&mut sources, SourceName::Catalog)?;
    let catalog = catalog_from_table(&table, required_columns, &mut warnings)?;
    record_loaded(SourceName::Catalog, catalog.len());

    let table = read_source(&mut sources, SourceName::Plays)?;
    let records = transform::plays_to_long(&table, &mut warnings).map_err(|error| {
        LoadError::Transform {
            source_name: SourceName::Plays,
            error,
        }
    })?;
    let plays = assign_session_order(records);
    record_loaded(SourceName::Plays, plays.len());

    let table = read_source(&mut sources, SourceName::Requests)?;
    let requests = transform::requests_to_long(&table, &mut warnings).map_err(|error| {
        LoadError::Transform {
            source_name: SourceName::Requests,
            error,
        }
    })?;
    record_loaded(SourceName::Requests, requests.len());

    tracing::info!(
        catalog = catalog.len(),
        plays = plays.len(),
        requests = requests.len(),
        warnings = warnings.len(),
        "snapshot loaded"
    );

    Ok(Snapshot::new(catalog, plays, requests).with_warnings(warnings))
}

fn read_source(sources: &mut Sources, name: SourceName) -> Result<RawTable> {
    let handle = sources.take(name).ok_or(LoadError::MissingSource(name))?;
    let table = handle.read().map_err(|error| LoadError::Read {
        source_name: name,
        error,
    })?;
    // A file without a header line supplies no data, however it was handed in.
    if table.headers().is_empty() {
        return Err(LoadError::MissingSource(name));
    }
    Ok(table)
}

fn record_loaded(name: SourceName, rows: usize) {
    tracing::debug!(source = %name, rows, "source loaded");
    metrics::counter!("tabdb_rows_loaded_total", "source" => name.as_str()).increment(rows as u64);
}

/// Validates the catalog schema and coerces every row.
///
/// Fails only on missing columns. Unreadable cells become unknown with a
/// [`Warning::TypeCoercion`]; rows without song or artist are dropped with a
/// [`Warning::MissingIdentity`].
pub fn catalog_from_table(
    table: &RawTable,
    required_columns: &[&str],
    warnings: &mut Warnings,
) -> Result<Catalog> {
    let mut required: Vec<&str> = columns::IDENTITY.to_vec();
    for column in required_columns {
        if !required.contains(column) {
            required.push(*column);
        }
    }
    let missing = table.missing_columns(&required);
    if !missing.is_empty() {
        return Err(LoadError::Schema {
            source_name: SourceName::Catalog,
            missing,
        });
    }

    let extra_columns: Vec<(usize, &String, ColumnKind)> = table
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, name)| !columns::REQUIRED_CATALOG.contains(&name.as_str()))
        .map(|(col, name)| (col, name, ColumnKind::infer(table, col)))
        .collect();

    let mut items = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let mut reader = RowReader {
            table,
            row,
            warnings: &mut *warnings,
        };
        let Some(key) = SongKey::from_cells(reader.raw(columns::SONG), reader.raw(columns::ARTIST))
        else {
            reader.warnings.push(Warning::MissingIdentity {
                table: SourceName::Catalog.to_string(),
                row: row + 1,
            });
            continue;
        };

        let mut item = CatalogItem::new(key);
        item.year = reader.parsed(columns::YEAR, "integer year", parse_integer);
        item.artist_type = reader.parsed(columns::TYPE, "Group or Person", |raw| {
            raw.parse::<ArtistType>().ok()
        });
        item.gender = reader.text(columns::GENDER);
        item.duration = reader.parsed(columns::DURATION, "hh:mm:ss duration", parse_duration_secs);
        item.language = reader.text(columns::LANGUAGE);
        item.tabber = reader.text(columns::TABBER);
        item.source = reader.text(columns::SOURCE);
        item.date = reader.parsed(columns::DATE, "YYYYMMDD date", parse_compact_date);
        item.difficulty = reader.parsed(columns::DIFFICULTY, "number", parse_number);
        item.special_books = reader.text(columns::SPECIAL_BOOKS);
        for (col, name, kind) in &extra_columns {
            if let Some(raw) = table.cell(row, *col) {
                item.extra.insert((*name).clone(), kind.cell(raw));
            }
        }

        items.push(item);
    }

    Ok(Catalog::new(table.headers().to_vec(), items))
}

/// Type of a pass-through column, inferred from all of its non-empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Number,
    Text,
}

impl ColumnKind {
    /// The narrowest kind every non-empty cell of `col` parses as. A column
    /// with no values is text.
    fn infer(table: &RawTable, col: usize) -> Self {
        let mut cells = (0..table.row_count())
            .filter_map(|row| table.cell(row, col))
            .peekable();
        if cells.peek().is_none() {
            return ColumnKind::Text;
        }

        let mut kind = ColumnKind::Integer;
        for raw in cells {
            if kind == ColumnKind::Integer && parse_integer(raw).is_none() {
                kind = ColumnKind::Number;
            }
            if kind == ColumnKind::Number && parse_number(raw).is_none() {
                return ColumnKind::Text;
            }
        }
        kind
    }

    fn cell(self, raw: &str) -> CellValue {
        let parsed = match self {
            ColumnKind::Integer => parse_integer(raw).map(CellValue::Integer),
            ColumnKind::Number => parse_number(raw).map(CellValue::Number),
            ColumnKind::Text => None,
        };
        parsed.unwrap_or_else(|| CellValue::from(raw))
    }
}

/// Reads the cells of one catalog row, reporting values that fail to parse.
struct RowReader<'a> {
    table: &'a RawTable,
    row: usize,
    warnings: &'a mut Warnings,
}

impl<'a> RowReader<'a> {
    fn raw(&self, column: &str) -> Option<&'a str> {
        let col = self.table.column_index(column)?;
        self.table.cell(self.row, col)
    }

    fn text(&self, column: &str) -> Option<String> {
        self.raw(column).map(str::to_string)
    }

    fn parsed<T>(
        &mut self,
        column: &str,
        expected: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let raw = self.raw(column)?;
        let value = parse(raw);
        if value.is_none() {
            self.warnings.push(Warning::TypeCoercion {
                table: SourceName::Catalog.to_string(),
                row: self.row + 1,
                column: column.to_string(),
                value: raw.to_string(),
                expected,
            });
        }
        value
    }
}
