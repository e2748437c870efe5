//! Shared types for the tab database: the song natural key, typed cell
//! values, lenient cell parsers and the warning channel.

pub mod coerce;
pub mod types;
pub mod value;
pub mod warning;

pub use types::SongKey;
pub use value::{CellValue, compare_missing_last, missing_last_by};
pub use warning::{Warning, Warnings};
