//! Value objects for the catalog and the request log.

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Whether a song is performed by a group or a single person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtistType {
    Group,
    Person,
}

impl ArtistType {
    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtistType::Group => "Group",
            ArtistType::Person => "Person",
        }
    }
}

impl std::fmt::Display for ArtistType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a cell is neither `Group` nor `Person`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown artist type: {0:?}")]
pub struct ParseArtistTypeError(pub String);

impl std::str::FromStr for ArtistType {
    type Err = ParseArtistTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("group") {
            Ok(ArtistType::Group)
        } else if trimmed.eq_ignore_ascii_case("person") {
            Ok(ArtistType::Person)
        } else {
            Err(ParseArtistTypeError(s.to_string()))
        }
    }
}

/// Who asked for a song to be played.
///
/// The request log records a one-letter code; anything outside the known
/// alphabet is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Requester {
    Group,
    Audience,
    Unknown,
    Other(String),
}

impl Requester {
    /// Normalizes a request-log code: `G` → Group, `A` → Audience, `?` → Unknown.
    pub fn from_code(code: &str) -> Self {
        match code {
            "G" => Requester::Group,
            "A" => Requester::Audience,
            "?" => Requester::Unknown,
            other => Requester::Other(other.to_string()),
        }
    }

    /// Returns the display label.
    pub fn as_str(&self) -> &str {
        match self {
            Requester::Group => "Group",
            Requester::Audience => "Audience",
            Requester::Unknown => "Unknown",
            Requester::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for Requester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Requester {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
