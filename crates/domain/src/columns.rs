//! Column names shared by the sources and the result tables.

pub const SONG: &str = "song";
pub const ARTIST: &str = "artist";
pub const YEAR: &str = "year";
pub const TYPE: &str = "type";
pub const GENDER: &str = "gender";
pub const DURATION: &str = "duration";
pub const LANGUAGE: &str = "language";
pub const TABBER: &str = "tabber";
pub const SOURCE: &str = "source";
pub const DATE: &str = "date";
pub const DIFFICULTY: &str = "difficulty";
pub const SPECIAL_BOOKS: &str = "specialbooks";

/// Raw ordinal read from a play-log cell.
pub const PLAY_ORDER: &str = "play_order";
/// 1-based position of a song within its session.
pub const SESSION_ORDER: &str = "order_of_song_played";
/// Normalized requester of a request-log cell.
pub const REQUESTED_BY: &str = "requested_by";

/// Identity columns every source carries.
pub const IDENTITY: [&str; 2] = [SONG, ARTIST];

/// Columns the catalog source must provide.
pub const REQUIRED_CATALOG: [&str; 12] = [
    SONG,
    ARTIST,
    YEAR,
    TYPE,
    GENDER,
    DURATION,
    LANGUAGE,
    TABBER,
    SOURCE,
    DATE,
    DIFFICULTY,
    SPECIAL_BOOKS,
];
