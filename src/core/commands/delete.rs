use tracing::debug;

use crate::core::commands::{CommandContext, CommandOutcome};
use crate::core::error::{CommandError, CommandResult};
use crate::core::index::Index;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCommand {
    index: Index,
}

impl DeleteCommand {
    pub fn new(index: Index) -> Self {
        Self { index }
    }

    pub fn index(&self) -> Index {
        self.index
    }

    /// Soft-deletes the record shown at `index`, or erases it for good when an
    /// identical copy already sits in the deleted list. Either way the command
    /// commits exactly once.
    pub(super) fn execute(self, ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
        let view_index = self.index.zero_based();
        let target = ctx
            .model
            .filtered_record(view_index)
            .map(|(_, record)| record.clone())
            .map_err(|_| CommandError::InvalidRecordIndex)?;
        let permanent = ctx.model.has_deleted_record(&target);

        // Pins must reflect the post-removal list before the record leaves it.
        if ctx.pins.requires_adjustment(ctx.model, view_index)? {
            ctx.pins.decrement_pinned(ctx.model, view_index)?;
            ctx.pins.save_pinned_state(ctx.model);
        }

        if permanent {
            ctx.model.delete_record(&target)?;
            ctx.model.remove_deleted_record(&target)?;
            ctx.model.erase_record_from_history(&target);
            ctx.model.commit();
            debug!(record = %target, "record permanently deleted");
            return Ok(CommandOutcome::changed(format!(
                "Permanently deleted Record: {target}"
            )));
        }

        ctx.model.move_record_to_deleted(&target)?;
        ctx.model.commit();
        Ok(CommandOutcome::changed(format!("Deleted Record: {target}")))
    }
}
