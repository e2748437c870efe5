//! Long-format records of the play and request logs.

use chrono::NaiveDate;
use common::{CellValue, SongKey};
use serde::Serialize;

use crate::columns;
use crate::value_objects::Requester;

/// A play-log cell before session ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayRecord {
    #[serde(flatten)]
    pub key: SongKey,
    /// `None` when the column label was not a `YYYYMMDD` date.
    pub date: Option<NaiveDate>,
    /// Ordinal written in the cell; `None` when it was not numeric.
    pub play_order: Option<f64>,
}

impl PlayRecord {
    pub fn new(key: SongKey, date: Option<NaiveDate>, play_order: Option<f64>) -> Self {
        Self {
            key,
            date,
            play_order,
        }
    }
}

/// A song played in a session, with its position in that session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayEvent {
    #[serde(flatten)]
    pub key: SongKey,
    pub date: Option<NaiveDate>,
    pub play_order: Option<f64>,
    /// Dense 1-based rank among all plays sharing `date`.
    #[serde(rename = "order_of_song_played")]
    pub session_order: u32,
}

impl PlayEvent {
    /// Attaches a session order to a play record.
    pub fn from_record(record: PlayRecord, session_order: u32) -> Self {
        Self {
            key: record.key,
            date: record.date,
            play_order: record.play_order,
            session_order,
        }
    }

    /// Returns the value of a column by name.
    pub fn value(&self, column: &str) -> Option<CellValue> {
        match column {
            columns::DATE => self.date.map(CellValue::Date),
            columns::PLAY_ORDER => self.play_order.map(CellValue::Number),
            columns::SESSION_ORDER => Some(CellValue::Integer(i64::from(self.session_order))),
            _ => None,
        }
    }
}

/// A song requested in a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEvent {
    #[serde(flatten)]
    pub key: SongKey,
    pub date: NaiveDate,
    pub requested_by: Requester,
}

impl RequestEvent {
    pub fn new(key: SongKey, date: NaiveDate, requested_by: Requester) -> Self {
        Self {
            key,
            date,
            requested_by,
        }
    }

    /// Returns the value of a column by name.
    pub fn value(&self, column: &str) -> Option<CellValue> {
        match column {
            columns::DATE => Some(CellValue::Date(self.date)),
            columns::REQUESTED_BY => Some(CellValue::from(self.requested_by.as_str())),
            _ => None,
        }
    }
}
