//! Filter criteria for the catalog.

use common::coerce::{parse_flexible_date, parse_integer, parse_number};
use common::{Warning, Warnings};
use domain::ArtistType;

/// Sentinel selection value meaning "do not restrict this field".
pub const ALL: &str = "All";

/// A range exactly as the user typed it.
///
/// Bounds are kept as text so a malformed range can be skipped with a warning
/// instead of failing the whole filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeInput {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RangeInput {
    /// Creates a range from two bounds. Blank bounds count as missing.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        let bound = |s: String| {
            let s = s.trim().to_string();
            (!s.is_empty()).then_some(s)
        };
        Self {
            start: bound(start.into()),
            end: bound(end.into()),
        }
    }

    /// Parses the `"start,end"` form. Text without a comma is a partial range.
    pub fn parse_pair(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::default();
        }
        match text.split_once(',') {
            Some((start, end)) => Self::new(start, end),
            None => Self::new(text, ""),
        }
    }

    /// True when neither bound was given.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Parses both bounds, or records why the range is skipped.
    ///
    /// Returns `None` silently for an empty range.
    pub(crate) fn resolve<T>(
        &self,
        filter: &'static str,
        expected: &str,
        parse: impl Fn(&str) -> Option<T>,
        warnings: &mut Warnings,
    ) -> Option<(T, T)> {
        let (start, end) = match (&self.start, &self.end) {
            (None, None) => return None,
            (Some(start), Some(end)) => (start, end),
            (Some(_), None) | (None, Some(_)) => {
                warnings.push(Warning::FilterInput {
                    filter,
                    reason: "both a start and an end bound are required".to_string(),
                });
                return None;
            }
        };

        let mut bound = |raw: &String| {
            let value = parse(raw);
            if value.is_none() {
                warnings.push(Warning::FilterInput {
                    filter,
                    reason: format!("cannot read {raw:?} as {expected}"),
                });
            }
            value
        };
        let start = bound(start)?;
        let end = bound(end)?;
        Some((start, end))
    }
}

/// A multi-select over one categorical field.
///
/// An empty selection, or one containing [`ALL`], does not restrict the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(Vec<String>);

impl Selection {
    /// Creates a selection from values.
    pub fn of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// True when this selection does not restrict anything.
    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty() || self.0.iter().any(|v| v == ALL)
    }

    /// Set-membership test for a cell; missing cells never match.
    pub fn matches(&self, value: Option<&str>) -> bool {
        value.is_some_and(|value| self.0.iter().any(|v| v == value))
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }
}

/// Constraints applied to the catalog. Every constraint is optional and all of
/// them combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive year range.
    pub year: RangeInput,

    /// Inclusive difficulty range.
    pub difficulty: RangeInput,

    /// Inclusive date range.
    pub date: RangeInput,

    pub languages: Selection,
    pub genders: Selection,
    pub tabbers: Selection,
    pub sources: Selection,

    /// Exact match on the artist type.
    pub artist_type: Option<ArtistType>,
}

impl FilterCriteria {
    /// Creates criteria that match the whole catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to an inclusive year range.
    pub fn year_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.year = RangeInput::new(start, end);
        self
    }

    /// Restricts to an inclusive difficulty range.
    pub fn difficulty_range(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.difficulty = RangeInput::new(min, max);
        self
    }

    /// Restricts to an inclusive date range.
    pub fn date_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.date = RangeInput::new(start, end);
        self
    }

    /// Restricts to any of these languages.
    pub fn languages<I: IntoIterator<Item = S>, S: Into<String>>(mut self, values: I) -> Self {
        self.languages = Selection::of(values);
        self
    }

    /// Restricts to any of these genders.
    pub fn genders<I: IntoIterator<Item = S>, S: Into<String>>(mut self, values: I) -> Self {
        self.genders = Selection::of(values);
        self
    }

    /// Restricts to any of these tabbers.
    pub fn tabbers<I: IntoIterator<Item = S>, S: Into<String>>(mut self, values: I) -> Self {
        self.tabbers = Selection::of(values);
        self
    }

    /// Restricts to any of these sources.
    pub fn sources<I: IntoIterator<Item = S>, S: Into<String>>(mut self, values: I) -> Self {
        self.sources = Selection::of(values);
        self
    }

    /// Restricts to one artist type.
    pub fn artist_type(mut self, artist_type: ArtistType) -> Self {
        self.artist_type = Some(artist_type);
        self
    }

    pub(crate) fn year_bounds(&self, warnings: &mut Warnings) -> Option<(i64, i64)> {
        self.year.resolve("year", "a whole year", parse_integer, warnings)
    }

    pub(crate) fn difficulty_bounds(&self, warnings: &mut Warnings) -> Option<(f64, f64)> {
        self.difficulty
            .resolve("difficulty", "a number", parse_number, warnings)
    }

    pub(crate) fn date_bounds(
        &self,
        warnings: &mut Warnings,
    ) -> Option<(chrono::NaiveDate, chrono::NaiveDate)> {
        self.date
            .resolve("date", "a YYYY-MM-DD date", parse_flexible_date, warnings)
    }
}
