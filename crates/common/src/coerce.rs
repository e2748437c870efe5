//! Lenient parsers for spreadsheet cells.
//!
//! Every parser returns `None` for values it cannot interpret; callers decide
//! whether that is a warning or an error.

use chrono::NaiveDate;

/// Literal format of date cells and date column labels.
pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Strips the `.0` suffix spreadsheets add when a whole-number column has gaps.
fn strip_float_suffix(raw: &str) -> &str {
    raw.strip_suffix(".0").unwrap_or(raw)
}

/// Parses a `YYYYMMDD` date.
pub fn parse_compact_date(raw: &str) -> Option<NaiveDate> {
    let raw = strip_float_suffix(raw.trim());
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, COMPACT_DATE_FORMAT).ok()
}

/// Parses a date typed by a person: `YYYY-MM-DD`, `YYYY/MM/DD` or `YYYYMMDD`.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| parse_compact_date(raw))
}

/// Parses an `hours:minutes:seconds` duration into seconds.
///
/// Seconds may carry a fractional part; minutes and seconds must be below 60.
pub fn parse_duration_secs(raw: &str) -> Option<f64> {
    let mut parts = raw.trim().split(':');
    let (hours, minutes, seconds) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    let seconds: f64 = seconds.trim().parse().ok()?;
    if minutes >= 60 || !(0.0..60.0).contains(&seconds) {
        return None;
    }

    Some(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds)
}

/// Parses a finite number.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a whole number, accepting float renderings such as `1995.0`.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        parse_number(raw)
            .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
            .map(|v| v as i64)
    })
}
