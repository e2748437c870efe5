//! Summary statistics over a result table, the data behind the charts.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use domain::columns;
use serde::Serialize;

use crate::views::ResultTable;

/// Default number of difficulty bins.
pub const DEFAULT_BINS: usize = 5;

/// Largest number of difficulty bins; larger requests are capped.
pub const MAX_BINS: usize = 1000;

/// One histogram bin. Bins are half-open except the last, which includes `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecadeCount {
    pub decade: i64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatePoint {
    pub date: NaiveDate,
    pub cumulative: usize,
}

/// Equal-width histogram of the known difficulties.
///
/// The range spans the smallest to the largest value; a single distinct value
/// gets a range of one unit centred on it. Returns no bins when there is
/// nothing to count. At most [`MAX_BINS`] bins are returned.
pub fn difficulty_histogram(table: &ResultTable, bins: usize) -> Vec<HistogramBin> {
    let bins = bins.min(MAX_BINS);
    let values: Vec<f64> = table
        .rows()
        .iter()
        .filter_map(|r| r.item.difficulty)
        .collect();
    if bins == 0 || values.is_empty() {
        return Vec::new();
    }

    let (mut low, mut high) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if low == high {
        low -= 0.5;
        high += 0.5;
    }
    let width = (high - low) / bins as f64;

    let mut counts = vec![0usize; bins];
    for value in values {
        let index = (((value - low) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: low + width * i as f64,
            end: if i + 1 == bins {
                high
            } else {
                low + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// Known durations converted from seconds to minutes, in row order.
pub fn durations_in_minutes(table: &ResultTable) -> Vec<f64> {
    table
        .rows()
        .iter()
        .filter_map(|r| r.item.duration)
        .map(|secs| secs / 60.0)
        .collect()
}

/// Occurrences of each non-missing value of a column, most frequent first.
/// Equal counts are ordered by value.
pub fn value_counts(table: &ResultTable, column: &str) -> Vec<ValueCount> {
    counted(
        table
            .rows()
            .iter()
            .filter_map(|r| r.value(column))
            .map(|v| v.to_string()),
    )
}

/// Gender counts after normalizing spelling (`" FEMALE"` counts as `"Female"`).
pub fn gender_counts(table: &ResultTable) -> Vec<ValueCount> {
    counted(
        table
            .rows()
            .iter()
            .filter_map(|r| r.item.gender.as_deref())
            .map(normalize_label)
            .filter(|g| !g.is_empty()),
    )
}

/// Rows per decade of release, oldest decade first.
pub fn decade_counts(table: &ResultTable) -> Vec<DecadeCount> {
    let mut decades: BTreeMap<i64, usize> = BTreeMap::new();
    for year in table.rows().iter().filter_map(|r| r.item.year) {
        *decades.entry(year.div_euclid(10) * 10).or_default() += 1;
    }
    decades
        .into_iter()
        .map(|(decade, count)| DecadeCount { decade, count })
        .collect()
}

/// Running total of rows by tab date, earliest first.
pub fn cumulative_by_date(table: &ResultTable) -> Vec<DatePoint> {
    let mut per_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in table.rows().iter().filter_map(|r| r.item.date) {
        *per_date.entry(date).or_default() += 1;
    }

    let mut cumulative = 0;
    per_date
        .into_iter()
        .map(|(date, count)| {
            cumulative += count;
            DatePoint { date, cumulative }
        })
        .collect()
}

/// Every statistic for one result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub difficulty: Vec<HistogramBin>,
    pub duration_minutes: Vec<f64>,
    pub languages: Vec<ValueCount>,
    pub genders: Vec<ValueCount>,
    pub decades: Vec<DecadeCount>,
    pub cumulative: Vec<DatePoint>,
}

impl Summary {
    pub fn of(table: &ResultTable, bins: usize) -> Self {
        Self {
            rows: table.len(),
            difficulty: difficulty_histogram(table, bins),
            duration_minutes: durations_in_minutes(table),
            languages: value_counts(table, columns::LANGUAGE),
            genders: gender_counts(table),
            decades: decade_counts(table),
            cumulative: cumulative_by_date(table),
        }
    }
}

fn normalize_label(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn counted(values: impl Iterator<Item = String>) -> Vec<ValueCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut counts: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect();
    // BTreeMap order already breaks ties by value.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
