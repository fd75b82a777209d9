pub mod json_backend;

use std::path::Path;

use crate::errors::StorageError;
use crate::ledger::TrackerState;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Abstraction over persistence backends that keep the committed tracker state.
pub trait StorageBackend: Send + Sync {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<TrackerState>>;
    fn save(&self, state: &TrackerState) -> Result<()>;
    fn path(&self) -> &Path;
}

pub use json_backend::{JsonStorage, CURRENT_SCHEMA_VERSION};
