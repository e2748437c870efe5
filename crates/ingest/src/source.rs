//! Named source handles supplied by the caller.

use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

use crate::table::RawTable;

/// The three sources of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceName {
    /// The catalog of tabbed songs.
    Catalog,
    /// Wide play log: one column per session date, cells hold the play ordinal.
    Plays,
    /// Wide request log: one column per session date, cells hold a requester code.
    Requests,
}

impl SourceName {
    /// Load order of the sources.
    pub const ALL: [SourceName; 3] = [SourceName::Catalog, SourceName::Plays, SourceName::Requests];

    /// The source's conventional file stem.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceName::Catalog => "tabdb",
            SourceName::Plays => "playdb",
            SourceName::Requests => "requestdb",
        }
    }
}

impl std::fmt::Display for SourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.csv", self.as_str())
    }
}

/// Where a source's rows come from.
#[derive(Debug, Clone)]
pub enum SourceHandle {
    /// A CSV file on disk.
    Path(PathBuf),
    /// CSV text held in memory.
    Csv(String),
    /// An already parsed table.
    Table(RawTable),
}

impl SourceHandle {
    /// True when the handle carries nothing to read.
    pub fn is_empty(&self) -> bool {
        match self {
            SourceHandle::Path(path) => path.as_os_str().is_empty(),
            SourceHandle::Csv(text) => text.trim().is_empty(),
            SourceHandle::Table(table) => table.headers().is_empty(),
        }
    }

    /// Opens and parses the handle.
    pub fn read(self) -> Result<RawTable, csv::Error> {
        match self {
            SourceHandle::Path(path) => RawTable::from_reader(File::open(path)?),
            SourceHandle::Csv(text) => RawTable::from_csv_str(&text),
            SourceHandle::Table(table) => Ok(table),
        }
    }
}

/// Mapping of source name to handle for one load call.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    handles: HashMap<SourceName, SourceHandle>,
}

impl Sources {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the handle for a source.
    pub fn with(mut self, name: SourceName, handle: SourceHandle) -> Self {
        self.handles.insert(name, handle);
        self
    }

    /// Sets a file path for a source.
    pub fn path(self, name: SourceName, path: impl Into<PathBuf>) -> Self {
        self.with(name, SourceHandle::Path(path.into()))
    }

    /// Sets in-memory CSV text for a source.
    pub fn csv(self, name: SourceName, text: impl Into<String>) -> Self {
        self.with(name, SourceHandle::Csv(text.into()))
    }

    /// Removes and returns a non-empty handle.
    pub fn take(&mut self, name: SourceName) -> Option<SourceHandle> {
        self.handles.remove(&name).filter(|h| !h.is_empty())
    }
}
