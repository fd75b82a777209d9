//! Live tracker state plus a linear undo/redo history of committed snapshots.

use tracing::debug;

use crate::domain::{Record, Source};
use crate::errors::{FinanceError, Result};
use crate::ledger::filtered::{FilteredView, Predicate};
use crate::ledger::state::{PinnedItems, TrackerState};
use crate::ledger::unique_list::UniqueList;

/// Mutable tracker model with committed history.
///
/// History is a list of snapshots and a cursor. Right after `new`, `commit`,
/// `undo` or `redo` the live state equals the snapshot under the cursor.
/// Structural removals from the active record list do not touch pins; the
/// caller adjusts them through [`crate::ledger::PinnedCoordinator`] first.
pub struct VersionedTracker {
    live: TrackerState,
    history: Vec<TrackerState>,
    cursor: usize,
    record_view: FilteredView<Record>,
    source_view: FilteredView<Source>,
    journal: Option<Journal>,
}

/// History changes made since [`VersionedTracker::begin_transaction`], kept so
/// the whole transaction can be taken back.
#[derive(Debug)]
struct Journal {
    cursor: usize,
    changes: Vec<HistoryChange>,
}

#[derive(Debug)]
enum HistoryChange {
    /// A commit pushed one snapshot and cut off these redo snapshots.
    Committed { dropped: Vec<TrackerState> },
    /// Snapshots were scrubbed; this is the history before scrubbing.
    Erased { previous: Vec<TrackerState> },
}

impl Default for VersionedTracker {
    fn default() -> Self {
        Self::new(TrackerState::default())
    }
}

impl VersionedTracker {
    pub fn new(initial: TrackerState) -> Self {
        let mut record_view = FilteredView::new();
        record_view.set_reversed(initial.reversed);
        Self {
            live: initial.clone(),
            history: vec![initial],
            cursor: 0,
            record_view,
            source_view: FilteredView::new(),
            journal: None,
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.live
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    pub fn has_uncommitted_changes(&self) -> bool {
        self.history
            .get(self.cursor)
            .map_or(true, |committed| committed != &self.live)
    }

    /// Appends the live state to history, dropping any redo branch.
    pub fn commit(&mut self) {
        let dropped = self.history.split_off(self.cursor + 1);
        if let Some(journal) = &mut self.journal {
            journal.changes.push(HistoryChange::Committed { dropped });
        }
        self.history.push(self.live.clone());
        self.cursor = self.history.len() - 1;
        debug!(
            cursor = self.cursor,
            history = self.history.len(),
            "committed tracker state"
        );
    }

    pub fn undo(&mut self) -> Result<()> {
        if !self.can_undo() {
            return Err(FinanceError::NoPriorState);
        }
        self.cursor -= 1;
        self.restore();
        debug!(cursor = self.cursor, "undo restored tracker state");
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        if !self.can_redo() {
            return Err(FinanceError::NoLaterState);
        }
        self.cursor += 1;
        self.restore();
        debug!(cursor = self.cursor, "redo restored tracker state");
        Ok(())
    }

    /// Throws away live mutations that were never committed.
    pub fn discard_uncommitted(&mut self) {
        if self.has_uncommitted_changes() {
            debug!(cursor = self.cursor, "discarding uncommitted tracker changes");
            self.restore();
        }
    }

    /// Starts journaling history changes so they can be rolled back as one unit.
    pub fn begin_transaction(&mut self) {
        self.journal = Some(Journal {
            cursor: self.cursor,
            changes: Vec::new(),
        });
    }

    /// Keeps everything done since [`Self::begin_transaction`].
    pub fn end_transaction(&mut self) {
        self.journal = None;
    }

    /// Takes back every commit, scrub and cursor move since
    /// [`Self::begin_transaction`], including any redo branch a commit cut off.
    /// Without an open transaction only uncommitted changes are discarded.
    pub fn rollback_transaction(&mut self) {
        let Some(journal) = self.journal.take() else {
            self.discard_uncommitted();
            return;
        };
        for change in journal.changes.into_iter().rev() {
            match change {
                HistoryChange::Committed { dropped } => {
                    self.history.pop();
                    self.history.extend(dropped);
                }
                HistoryChange::Erased { previous } => self.history = previous,
            }
        }
        self.cursor = journal.cursor.min(self.history.len().saturating_sub(1));
        self.restore();
        debug!(cursor = self.cursor, history = self.history.len(), "rolled back transaction");
    }

    fn journal_erasure(&mut self) {
        if let Some(journal) = &mut self.journal {
            journal.changes.push(HistoryChange::Erased {
                previous: self.history.clone(),
            });
        }
    }

    fn restore(&mut self) {
        if let Some(snapshot) = self.history.get(self.cursor) {
            self.live = snapshot.clone();
        }
        self.record_view.set_reversed(self.live.reversed);
        self.record_view.show_all();
        self.source_view.show_all();
    }

    // Records

    pub fn records(&self) -> &UniqueList<Record> {
        &self.live.records
    }

    pub fn deleted_records(&self) -> &UniqueList<Record> {
        &self.live.deleted_records
    }

    pub fn has_record(&self, record: &Record) -> bool {
        self.live.records.contains(record)
    }

    pub fn add_record(&mut self, record: Record) -> Result<()> {
        self.live.records.add(record)
    }

    /// Removes `record` from the active list, returning its former position.
    pub fn delete_record(&mut self, record: &Record) -> Result<(usize, Record)> {
        self.live.records.remove(record)
    }

    pub fn set_record(&mut self, target: &Record, edited: Record) -> Result<()> {
        self.live.records.replace(target, edited).map(|_| ())
    }

    /// Exact-match lookup in the soft-deleted list.
    pub fn has_deleted_record(&self, record: &Record) -> bool {
        self.live.deleted_records.contains_exact(record)
    }

    pub fn add_deleted_record(&mut self, record: Record) -> Result<()> {
        self.live.deleted_records.add(record)
    }

    pub fn remove_deleted_record(&mut self, record: &Record) -> Result<Record> {
        let position = self
            .live
            .deleted_records
            .position_of_exact(record)
            .ok_or_else(|| FinanceError::NotFound(record.to_string()))?;
        self.live
            .deleted_records
            .remove_at(position)
            .ok_or_else(|| FinanceError::NotFound(record.to_string()))
    }

    /// Moves `record` from the active list to the soft-deleted list.
    ///
    /// An older soft-deleted copy that only matches by `is_same` is replaced by
    /// the newer one. Nothing changes when the record is not active.
    pub fn move_record_to_deleted(&mut self, record: &Record) -> Result<Record> {
        let position = self
            .live
            .records
            .position_of(record)
            .ok_or_else(|| FinanceError::NotFound(record.to_string()))?;
        let stored = self
            .live
            .records
            .get(position)
            .cloned()
            .ok_or_else(|| FinanceError::NotFound(record.to_string()))?;
        match self.live.deleted_records.position_of(&stored) {
            Some(existing) => {
                let older = self
                    .live
                    .deleted_records
                    .get(existing)
                    .cloned()
                    .ok_or_else(|| FinanceError::NotFound(stored.to_string()))?;
                self.live.deleted_records.replace(&older, stored.clone())?;
            }
            None => self.add_deleted_record(stored.clone())?,
        }
        self.delete_record(&stored)?;
        Ok(stored)
    }

    /// Scrubs `record` from every committed snapshot so undo cannot bring it back.
    pub fn erase_record_from_history(&mut self, record: &Record) {
        self.journal_erasure();
        for snapshot in &mut self.history {
            snapshot.erase_record(record);
        }
        debug!(record = %record, "erased record from history");
    }

    pub fn record_view(&self) -> &FilteredView<Record> {
        &self.record_view
    }

    pub fn filtered_records(&self) -> Vec<&Record> {
        self.record_view.items(&self.live.records)
    }

    pub fn filtered_record_count(&self) -> usize {
        self.record_view.len(&self.live.records)
    }

    /// Resolves a displayed index to `(list position, record)`.
    pub fn filtered_record(&self, index: usize) -> Result<(usize, &Record)> {
        self.record_view
            .get(&self.live.records, index)
            .ok_or_else(|| FinanceError::IndexOutOfRange {
                index,
                len: self.filtered_record_count(),
            })
    }

    pub fn update_record_filter(&mut self, predicate: Predicate<Record>) {
        self.record_view.set_predicate(predicate);
    }

    pub fn show_all_records(&mut self) {
        self.record_view.show_all();
    }

    /// Flips the displayed record order; the flag is part of the snapshot.
    pub fn reverse_records(&mut self) {
        self.record_view.reverse();
        self.live.reversed = self.record_view.is_reversed();
    }

    pub fn pinned(&self) -> &PinnedItems {
        &self.live.pinned
    }

    pub(crate) fn set_pinned(&mut self, pinned: PinnedItems) {
        self.live.pinned = pinned;
    }

    // Sources

    pub fn sources(&self) -> &UniqueList<Source> {
        &self.live.sources
    }

    pub fn deleted_sources(&self) -> &UniqueList<Source> {
        &self.live.deleted_sources
    }

    pub fn has_source(&self, source: &Source) -> bool {
        self.live.sources.contains(source)
    }

    pub fn add_source(&mut self, source: Source) -> Result<()> {
        self.live.sources.add(source)
    }

    pub fn delete_source(&mut self, source: &Source) -> Result<(usize, Source)> {
        self.live.sources.remove(source)
    }

    pub fn has_deleted_source(&self, source: &Source) -> bool {
        self.live.deleted_sources.contains_exact(source)
    }

    pub fn add_deleted_source(&mut self, source: Source) -> Result<()> {
        self.live.deleted_sources.add(source)
    }

    pub fn remove_deleted_source(&mut self, source: &Source) -> Result<Source> {
        let position = self
            .live
            .deleted_sources
            .position_of_exact(source)
            .ok_or_else(|| FinanceError::NotFound(source.to_string()))?;
        self.live
            .deleted_sources
            .remove_at(position)
            .ok_or_else(|| FinanceError::NotFound(source.to_string()))
    }

    /// Source counterpart of [`Self::move_record_to_deleted`].
    pub fn move_source_to_deleted(&mut self, source: &Source) -> Result<Source> {
        let position = self
            .live
            .sources
            .position_of(source)
            .ok_or_else(|| FinanceError::NotFound(source.to_string()))?;
        let stored = self
            .live
            .sources
            .get(position)
            .cloned()
            .ok_or_else(|| FinanceError::NotFound(source.to_string()))?;
        match self.live.deleted_sources.position_of(&stored) {
            Some(existing) => {
                let older = self
                    .live
                    .deleted_sources
                    .get(existing)
                    .cloned()
                    .ok_or_else(|| FinanceError::NotFound(stored.to_string()))?;
                self.live.deleted_sources.replace(&older, stored.clone())?;
            }
            None => self.add_deleted_source(stored.clone())?,
        }
        self.delete_source(&stored)?;
        Ok(stored)
    }

    pub fn erase_source_from_history(&mut self, source: &Source) {
        self.journal_erasure();
        for snapshot in &mut self.history {
            snapshot.erase_source(source);
        }
        debug!(source = %source, "erased source from history");
    }

    pub fn filtered_sources(&self) -> Vec<&Source> {
        self.source_view.items(&self.live.sources)
    }

    pub fn filtered_source(&self, index: usize) -> Result<(usize, &Source)> {
        self.source_view
            .get(&self.live.sources, index)
            .ok_or_else(|| FinanceError::IndexOutOfRange {
                index,
                len: self.source_view.len(&self.live.sources),
            })
    }

    pub fn show_all_sources(&mut self) {
        self.source_view.show_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, Description, Name, RecordDate};
    use std::collections::BTreeSet;

    fn record(name: &str, description: &str) -> Record {
        Record::new(
            Name::parse(name).unwrap(),
            Amount::parse("4").unwrap(),
            RecordDate::parse("02/02/2024").unwrap(),
            Description::new(description),
            BTreeSet::new(),
        )
    }

    #[test]
    fn undo_and_redo_fail_at_history_edges() {
        let mut tracker = VersionedTracker::default();
        assert_eq!(tracker.undo(), Err(FinanceError::NoPriorState));
        assert_eq!(tracker.redo(), Err(FinanceError::NoLaterState));
    }

    #[test]
    fn undo_then_redo_restores_live_state() {
        let mut tracker = VersionedTracker::default();
        tracker.add_record(record("Taxi", "")).unwrap();
        tracker.commit();
        let committed = tracker.state().clone();

        tracker.undo().unwrap();
        assert!(tracker.records().is_empty());
        tracker.redo().unwrap();
        assert_eq!(tracker.state(), &committed);
        assert!(!tracker.has_uncommitted_changes());
    }

    #[test]
    fn commit_after_undo_discards_redo_branch() {
        let mut tracker = VersionedTracker::default();
        tracker.add_record(record("Taxi", "")).unwrap();
        tracker.commit();
        tracker.undo().unwrap();

        tracker.add_record(record("Bus", "")).unwrap();
        tracker.commit();
        assert_eq!(tracker.history_len(), 2);
        assert_eq!(tracker.redo(), Err(FinanceError::NoLaterState));
    }

    #[test]
    fn rollback_brings_back_the_redo_branch() {
        let mut tracker = VersionedTracker::default();
        tracker.add_record(record("Taxi", "")).unwrap();
        tracker.commit();
        tracker.undo().unwrap();

        tracker.begin_transaction();
        tracker.add_record(record("Bus", "")).unwrap();
        tracker.commit();
        tracker.rollback_transaction();

        assert!(tracker.records().is_empty());
        assert_eq!(tracker.history_len(), 2);
        tracker.redo().unwrap();
        assert_eq!(tracker.records().len(), 1);
    }

    #[test]
    fn rollback_restores_erased_snapshots() {
        let taxi = record("Taxi", "");
        let mut tracker = VersionedTracker::default();
        tracker.add_record(taxi.clone()).unwrap();
        tracker.commit();
        let before = tracker.state().clone();

        tracker.begin_transaction();
        tracker.erase_record_from_history(&taxi);
        tracker.commit();
        tracker.rollback_transaction();

        assert_eq!(tracker.state(), &before);
        tracker.undo().unwrap();
        tracker.redo().unwrap();
        assert_eq!(tracker.records().len(), 1);
    }

    #[test]
    fn discard_uncommitted_rolls_back_live_changes() {
        let mut tracker = VersionedTracker::default();
        tracker.add_record(record("Taxi", "")).unwrap();
        assert!(tracker.has_uncommitted_changes());
        tracker.discard_uncommitted();
        assert!(tracker.records().is_empty());
    }

    #[test]
    fn move_to_deleted_replaces_older_same_copy() {
        let mut tracker = VersionedTracker::default();
        tracker.add_deleted_record(record("Taxi", "old")).unwrap();
        tracker.add_record(record("Taxi", "new")).unwrap();

        tracker.move_record_to_deleted(&record("Taxi", "new")).unwrap();
        assert!(tracker.records().is_empty());
        assert_eq!(tracker.deleted_records().len(), 1);
        assert!(tracker.has_deleted_record(&record("Taxi", "new")));
    }

    #[test]
    fn erase_from_history_scrubs_snapshots_and_pins() {
        let mut tracker = VersionedTracker::default();
        tracker.add_record(record("Taxi", "")).unwrap();
        tracker.add_record(record("Bus", "")).unwrap();
        tracker.set_pinned(PinnedItems::from_positions([1]));
        tracker.commit();

        tracker.erase_record_from_history(&record("Taxi", ""));
        tracker.undo().unwrap();
        tracker.redo().unwrap();
        assert_eq!(tracker.records().len(), 1);
        assert!(tracker.pinned().contains(0));
    }

    #[test]
    fn reversal_is_captured_by_snapshots() {
        let mut tracker = VersionedTracker::default();
        tracker.reverse_records();
        tracker.commit();
        assert!(tracker.state().is_reversed());

        tracker.undo().unwrap();
        assert!(!tracker.record_view().is_reversed());
        tracker.redo().unwrap();
        assert!(tracker.record_view().is_reversed());
    }
}
