//! Session order of plays.

use chrono::NaiveDate;
use common::missing_last_by;
use domain::{PlayEvent, PlayRecord};

/// Ranks plays within each session date.
///
/// Records are stably sorted by date, then play order, unknown values last.
/// Each date (plays with an unknown date form one partition of their own)
/// gets ranks 1, 2, 3, ... with no gaps. Exact ties keep their input order.
pub fn assign_session_order(mut records: Vec<PlayRecord>) -> Vec<PlayEvent> {
    records.sort_by(|a, b| {
        missing_last_by(a.date.as_ref(), b.date.as_ref(), NaiveDate::cmp).then_with(|| {
            missing_last_by(a.play_order.as_ref(), b.play_order.as_ref(), f64::total_cmp)
        })
    });

    let mut partition: Option<Option<NaiveDate>> = None;
    let mut rank = 0u32;
    records
        .into_iter()
        .map(|record| {
            if partition != Some(record.date) {
                partition = Some(record.date);
                rank = 0;
            }
            rank += 1;
            PlayEvent::from_record(record, rank)
        })
        .collect()
}
