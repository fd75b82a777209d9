//! Snapshot type captured by the tracker history.

use std::collections::BTreeSet;

use crate::domain::{Record, Source};
use crate::errors::{FinanceError, Result};
use crate::ledger::unique_list::UniqueList;

/// Set of pinned positions in the active record list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinnedItems {
    positions: BTreeSet<usize>,
}

impl PinnedItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
        }
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    /// Returns `false` when the position was already pinned.
    pub fn pin(&mut self, position: usize) -> bool {
        self.positions.insert(position)
    }

    /// Returns `false` when the position was not pinned.
    pub fn unpin(&mut self, position: usize) -> bool {
        self.positions.remove(&position)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied()
    }

    /// True when removing `position` would drop or shift a pin.
    pub fn affected_by_removal(&self, position: usize) -> bool {
        self.positions.range(position..).next().is_some()
    }

    /// Drops the pin at `removed` and shifts every pin above it down by one.
    pub fn shift_for_removal(&mut self, removed: usize) {
        self.positions = self
            .positions
            .iter()
            .filter(|position| **position != removed)
            .map(|position| {
                if *position > removed {
                    position - 1
                } else {
                    *position
                }
            })
            .collect();
    }
}

/// Immutable capture of every store at one point in history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    pub(crate) records: UniqueList<Record>,
    pub(crate) deleted_records: UniqueList<Record>,
    pub(crate) sources: UniqueList<Source>,
    pub(crate) deleted_sources: UniqueList<Source>,
    pub(crate) pinned: PinnedItems,
    pub(crate) reversed: bool,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a state from persisted parts, rejecting pins outside the record list.
    pub fn from_parts(
        records: UniqueList<Record>,
        deleted_records: UniqueList<Record>,
        sources: UniqueList<Source>,
        deleted_sources: UniqueList<Source>,
        pinned: PinnedItems,
        reversed: bool,
    ) -> Result<Self> {
        if let Some(position) = pinned.iter().find(|position| *position >= records.len()) {
            return Err(FinanceError::IndexOutOfRange {
                index: position,
                len: records.len(),
            });
        }
        Ok(Self {
            records,
            deleted_records,
            sources,
            deleted_sources,
            pinned,
            reversed,
        })
    }

    pub fn records(&self) -> &UniqueList<Record> {
        &self.records
    }

    pub fn deleted_records(&self) -> &UniqueList<Record> {
        &self.deleted_records
    }

    pub fn sources(&self) -> &UniqueList<Source> {
        &self.sources
    }

    pub fn deleted_sources(&self) -> &UniqueList<Source> {
        &self.deleted_sources
    }

    pub fn pinned(&self) -> &PinnedItems {
        &self.pinned
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Removes every trace of `record` (full equality) from this state.
    pub(crate) fn erase_record(&mut self, record: &Record) {
        if let Some(position) = self.records.position_of_exact(record) {
            self.records.remove_at(position);
            self.pinned.shift_for_removal(position);
        }
        if let Some(position) = self.deleted_records.position_of_exact(record) {
            self.deleted_records.remove_at(position);
        }
    }

    /// Removes every trace of `source` (full equality) from this state.
    pub(crate) fn erase_source(&mut self, source: &Source) {
        if let Some(position) = self.sources.position_of_exact(source) {
            self.sources.remove_at(position);
        }
        if let Some(position) = self.deleted_sources.position_of_exact(source) {
            self.deleted_sources.remove_at(position);
        }
    }
}
