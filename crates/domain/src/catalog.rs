//! The catalog of tabbed songs.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use common::{CellValue, SongKey};
use serde::Serialize;

use crate::columns;
use crate::value_objects::ArtistType;

/// One tabbed song with its static metadata.
///
/// Only the key is guaranteed; every other field is `None` when the source
/// cell was empty or could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    #[serde(flatten)]
    pub key: SongKey,
    pub year: Option<i64>,
    #[serde(rename = "type")]
    pub artist_type: Option<ArtistType>,
    pub gender: Option<String>,
    /// Length in seconds.
    pub duration: Option<f64>,
    /// Free-form, possibly comma-joined (`spanish,english`).
    pub language: Option<String>,
    pub tabber: Option<String>,
    pub source: Option<String>,
    pub date: Option<NaiveDate>,
    pub difficulty: Option<f64>,
    #[serde(rename = "specialbooks")]
    pub special_books: Option<String>,
    /// Columns beyond the known ones, typed per column when loaded.
    #[serde(flatten)]
    pub extra: BTreeMap<String, CellValue>,
}

impl CatalogItem {
    /// Creates an item with only its key set.
    pub fn new(key: SongKey) -> Self {
        Self {
            key,
            year: None,
            artist_type: None,
            gender: None,
            duration: None,
            language: None,
            tabber: None,
            source: None,
            date: None,
            difficulty: None,
            special_books: None,
            extra: BTreeMap::new(),
        }
    }

    /// Returns the value of a column by name, `None` when missing or unknown.
    pub fn value(&self, column: &str) -> Option<CellValue> {
        let text = |v: &Option<String>| v.as_deref().map(CellValue::from);
        match column {
            columns::SONG => Some(CellValue::from(self.key.song())),
            columns::ARTIST => Some(CellValue::from(self.key.artist())),
            columns::YEAR => self.year.map(CellValue::Integer),
            columns::TYPE => self.artist_type.map(|t| CellValue::from(t.as_str())),
            columns::GENDER => text(&self.gender),
            columns::DURATION => self.duration.map(CellValue::Number),
            columns::LANGUAGE => text(&self.language),
            columns::TABBER => text(&self.tabber),
            columns::SOURCE => text(&self.source),
            columns::DATE => self.date.map(CellValue::Date),
            columns::DIFFICULTY => self.difficulty.map(CellValue::Number),
            columns::SPECIAL_BOOKS => text(&self.special_books),
            other => self.extra.get(other).cloned(),
        }
    }
}

/// The loaded catalog: items in source order plus the source's column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    columns: Vec<String>,
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Creates a catalog from its column names and items.
    pub fn new(columns: Vec<String>, items: Vec<CatalogItem>) -> Self {
        Self { columns, items }
    }

    /// Column names in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogItem> {
        self.items.iter()
    }

    /// Sorted distinct non-missing values of a column, rendered as text.
    ///
    /// Used to offer the choices of a categorical filter.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| item.value(column))
            .map(|v| v.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(song: &str, language: Option<&str>) -> CatalogItem {
        let mut item = CatalogItem::new(SongKey::new(song, "Someone"));
        item.language = language.map(str::to_string);
        item
    }

    #[test]
    fn test_value_reads_known_and_extra_columns() {
        let mut item = item("Zombie", Some("english"));
        item.year = Some(1994);
        item.difficulty = Some(2.5);
        item.extra.insert("capo".to_string(), CellValue::Integer(2));
        item.extra.insert("tuning".to_string(), CellValue::from("drop D"));

        assert_eq!(item.value("song"), Some(CellValue::from("Zombie")));
        assert_eq!(item.value("year"), Some(CellValue::Integer(1994)));
        assert_eq!(item.value("difficulty"), Some(CellValue::Number(2.5)));
        assert_eq!(item.value("capo"), Some(CellValue::Integer(2)));
        assert_eq!(item.value("tuning"), Some(CellValue::from("drop D")));
        assert_eq!(item.value("gender"), None);
        assert_eq!(item.value("no_such_column"), None);
    }

    #[test]
    fn test_distinct_values_are_sorted_and_skip_missing() {
        let catalog = Catalog::new(
            vec!["song".to_string(), "language".to_string()],
            vec![
                item("A", Some("french")),
                item("B", None),
                item("C", Some("english")),
                item("D", Some("french")),
            ],
        );
        assert_eq!(catalog.distinct_values("language"), vec!["english", "french"]);
    }

    #[test]
    fn test_serialization_uses_source_column_names() {
        let mut item = item("Zombie", None);
        item.artist_type = Some(ArtistType::Group);
        item.special_books = Some("yes".to_string());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["song"], "Zombie");
        assert_eq!(json["type"], "Group");
        assert_eq!(json["specialbooks"], "yes");
    }
}
