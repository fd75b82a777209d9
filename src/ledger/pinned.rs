//! Staging area for pinned-record changes made during a command.

use tracing::debug;

use crate::errors::Result;
use crate::ledger::state::PinnedItems;
use crate::ledger::versioned::VersionedTracker;

/// Stages changes to the pinned set before they are written into the live
/// tracker state.
///
/// Indices are display indices into the current record view. Staged changes
/// only reach the tracker through [`PinnedCoordinator::save_pinned_state`];
/// a removal must be decremented and saved before the record leaves the list.
#[derive(Debug, Default)]
pub struct PinnedCoordinator {
    staged: Option<PinnedItems>,
}

impl PinnedCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    fn current<'a>(&'a self, model: &'a VersionedTracker) -> &'a PinnedItems {
        self.staged.as_ref().unwrap_or_else(|| model.pinned())
    }

    fn position(model: &VersionedTracker, view_index: usize) -> Result<usize> {
        model.filtered_record(view_index).map(|(position, _)| position)
    }

    pub fn has_staged_changes(&self) -> bool {
        self.staged.is_some()
    }

    pub fn is_pinned(&self, model: &VersionedTracker, view_index: usize) -> Result<bool> {
        let position = Self::position(model, view_index)?;
        Ok(self.current(model).contains(position))
    }

    /// Returns `false` when the record was already pinned.
    pub fn pin(&mut self, model: &VersionedTracker, view_index: usize) -> Result<bool> {
        let position = Self::position(model, view_index)?;
        let mut next = self.current(model).clone();
        let changed = next.pin(position);
        self.staged = Some(next);
        Ok(changed)
    }

    /// Returns `false` when the record was not pinned.
    pub fn unpin(&mut self, model: &VersionedTracker, view_index: usize) -> Result<bool> {
        let position = Self::position(model, view_index)?;
        let mut next = self.current(model).clone();
        let changed = next.unpin(position);
        self.staged = Some(next);
        Ok(changed)
    }

    /// True when removing the record at `view_index` drops or shifts a pin.
    pub fn requires_adjustment(&self, model: &VersionedTracker, view_index: usize) -> Result<bool> {
        let position = Self::position(model, view_index)?;
        Ok(self.current(model).affected_by_removal(position))
    }

    /// Stages the pin set as it must look once the record at `view_index` is gone.
    pub fn decrement_pinned(&mut self, model: &VersionedTracker, view_index: usize) -> Result<()> {
        let position = Self::position(model, view_index)?;
        let mut next = self.current(model).clone();
        next.shift_for_removal(position);
        debug!(position, pinned = next.len(), "staged pin adjustment");
        self.staged = Some(next);
        Ok(())
    }

    pub fn save_pinned_state(&mut self, model: &mut VersionedTracker) {
        if let Some(pinned) = self.staged.take() {
            model.set_pinned(pinned);
        }
    }

    pub fn discard(&mut self) {
        self.staged = None;
    }
}
