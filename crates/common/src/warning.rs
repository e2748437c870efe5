//! Non-fatal diagnostics.
//!
//! A warning never aborts an operation. Each one is logged when recorded and
//! also kept so the caller can report it.

use serde::Serialize;
use thiserror::Error;

/// A degradation that was tolerated instead of failing the operation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A cell could not be parsed to its column's type and became unknown.
    #[error("{table}: row {row}, column '{column}': cannot read {value:?} as {expected}")]
    TypeCoercion {
        table: String,
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    /// A row without song or artist was dropped.
    #[error("{table}: row {row} has no song/artist and was skipped")]
    MissingIdentity { table: String, row: usize },

    /// A malformed filter bound; the filter was skipped.
    #[error("{filter} filter skipped: {reason}")]
    FilterInput { filter: &'static str, reason: String },

    /// The filters matched no rows.
    #[error("no rows matched the current filters")]
    EmptyResult,
}

impl Warning {
    /// Short machine-readable name of the warning kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Warning::TypeCoercion { .. } => "type_coercion",
            Warning::MissingIdentity { .. } => "missing_identity",
            Warning::FilterInput { .. } => "filter_input",
            Warning::EmptyResult => "empty_result",
        }
    }
}

/// Ordered collection of warnings raised during one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Warnings(Vec<Warning>);

impl Warnings {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning, logging it and bumping the warnings counter.
    pub fn push(&mut self, warning: Warning) {
        tracing::warn!(kind = warning.kind(), "{warning}");
        metrics::counter!("tabdb_warnings_total", "kind" => warning.kind()).increment(1);
        self.0.push(warning);
    }

    /// Moves all warnings from `other` into this collection without re-logging them.
    pub fn extend(&mut self, other: Warnings) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.0.iter()
    }

    /// Counts warnings of one kind.
    pub fn count_kind(&self, kind: &str) -> usize {
        self.0.iter().filter(|w| w.kind() == kind).count()
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut warnings = Warnings::new();
        warnings.push(Warning::EmptyResult);
        warnings.push(Warning::MissingIdentity {
            table: "tabdb".to_string(),
            row: 3,
        });

        let kinds: Vec<_> = warnings.iter().map(Warning::kind).collect();
        assert_eq!(kinds, vec!["empty_result", "missing_identity"]);
        assert_eq!(warnings.count_kind("missing_identity"), 1);
    }

    #[test]
    fn test_messages_name_the_offending_field() {
        let warning = Warning::TypeCoercion {
            table: "tabdb".to_string(),
            row: 7,
            column: "duration".to_string(),
            value: "3 min".to_string(),
            expected: "hh:mm:ss duration",
        };
        assert_eq!(
            warning.to_string(),
            "tabdb: row 7, column 'duration': cannot read \"3 min\" as hh:mm:ss duration"
        );
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let warning = Warning::FilterInput {
            filter: "year",
            reason: "end bound missing".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "filter_input");
        assert_eq!(json["filter"], "year");
    }
}
