use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::domain::{Record, Source};
use crate::errors::StorageError;
use crate::ledger::{PinnedItems, TrackerState, UniqueList};
use crate::utils::paths::write_atomic;

use super::{Result, StorageBackend};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Stores the tracker as a single pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Option<TrackerState>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no data file yet");
            return Ok(None);
        }
        load_from_path(&self.path).map(Some)
    }

    fn save(&self, state: &TrackerState) -> Result<()> {
        save_to_path(state, &self.path)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

pub fn save_to_path(state: &TrackerState, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&StoredTracker::from_state(state))?;
    write_atomic(path, &json)?;
    debug!(path = %path.display(), records = state.records().len(), "saved tracker");
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<TrackerState> {
    let data = fs::read_to_string(path)?;
    let stored: StoredTracker = serde_json::from_str(&data)?;
    stored.into_state()
}

/// On-disk layout of a tracker snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct StoredTracker {
    schema_version: u8,
    #[serde(default)]
    records: Vec<Record>,
    #[serde(default)]
    deleted_records: Vec<Record>,
    #[serde(default)]
    sources: Vec<Source>,
    #[serde(default)]
    deleted_sources: Vec<Source>,
    #[serde(default)]
    pinned: Vec<usize>,
    #[serde(default)]
    reversed: bool,
}

impl StoredTracker {
    fn from_state(state: &TrackerState) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            records: state.records().iter().cloned().collect(),
            deleted_records: state.deleted_records().iter().cloned().collect(),
            sources: state.sources().iter().cloned().collect(),
            deleted_sources: state.deleted_sources().iter().cloned().collect(),
            pinned: state.pinned().iter().collect(),
            reversed: state.is_reversed(),
        }
    }

    fn into_state(self) -> Result<TrackerState> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchema {
                found: self.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        Ok(TrackerState::from_parts(
            UniqueList::from_entries(self.records)?,
            UniqueList::from_entries(self.deleted_records)?,
            UniqueList::from_entries(self.sources)?,
            UniqueList::from_entries(self.deleted_sources)?,
            PinnedItems::from_positions(self.pinned),
            self.reversed,
        )?)
    }
}
