use serde::{Deserialize, Serialize};

/// Natural key shared by the catalog and both event logs.
///
/// A song is identified by its title together with the performing artist;
/// two covers of the same title are different keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SongKey {
    pub song: String,
    pub artist: String,
}

impl SongKey {
    /// Creates a key from a song title and artist.
    pub fn new(song: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            song: song.into(),
            artist: artist.into(),
        }
    }

    /// Builds a key from optional cells, returning `None` if either part is missing.
    pub fn from_cells(song: Option<&str>, artist: Option<&str>) -> Option<Self> {
        match (song, artist) {
            (Some(song), Some(artist)) => Some(Self::new(song, artist)),
            _ => None,
        }
    }

    /// Returns the song title.
    pub fn song(&self) -> &str {
        &self.song
    }

    /// Returns the artist.
    pub fn artist(&self) -> &str {
        &self.artist
    }
}

impl std::fmt::Display for SongKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.song, self.artist)
    }
}

impl<S: Into<String>, A: Into<String>> From<(S, A)> for SongKey {
    fn from((song, artist): (S, A)) -> Self {
        Self::new(song, artist)
    }
}
