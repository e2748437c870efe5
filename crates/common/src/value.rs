//! Typed cell values used for column access and sorting.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

/// A single, non-missing cell of a result table.
///
/// Missing cells are represented as `Option<CellValue>::None` by the
/// accessors that produce these values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Integer(_) | CellValue::Number(_) => 0,
            CellValue::Date(_) => 1,
            CellValue::Text(_) => 2,
        }
    }

    /// Total order over cells of any kind.
    ///
    /// Numbers compare numerically regardless of integer/float storage; cells of
    /// different kinds order numbers before dates before text.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Integer(a), CellValue::Number(b)) => (*a as f64).total_cmp(b),
            (CellValue::Number(a), CellValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Returns the text content if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Integer(v) => write!(f, "{v}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

/// Orders two optional values with `cmp`, placing missing values after every
/// present one.
pub fn missing_last_by<T: ?Sized>(
    a: Option<&T>,
    b: Option<&T>,
    cmp: impl FnOnce(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compares two optional cells with missing values placed last.
///
/// When `descending` is set, present values are reversed but missing values
/// still sort after every present value.
pub fn compare_missing_last(
    a: Option<&CellValue>,
    b: Option<&CellValue>,
    descending: bool,
) -> Ordering {
    missing_last_by(a, b, |a, b| {
        let ord = a.total_cmp(b);
        if descending { ord.reverse() } else { ord }
    })
}
