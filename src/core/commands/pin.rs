use crate::core::commands::{CommandContext, CommandOutcome};
use crate::core::error::{CommandError, CommandResult};
use crate::core::index::Index;

pub const MESSAGE_ALREADY_PINNED: &str = "This record is already pinned.";
pub const MESSAGE_NOT_PINNED: &str = "This record is not pinned.";

/// Target of a `pin` or `unpin` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinCommand {
    index: Index,
}

impl PinCommand {
    pub fn new(index: Index) -> Self {
        Self { index }
    }

    pub(super) fn pin(self, ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
        let view_index = self.index.zero_based();
        let target = ctx
            .model
            .filtered_record(view_index)
            .map(|(_, record)| record.clone())
            .map_err(|_| CommandError::InvalidRecordIndex)?;
        if !ctx.pins.pin(ctx.model, view_index)? {
            return Err(CommandError::Validation(MESSAGE_ALREADY_PINNED.to_string()));
        }
        ctx.pins.save_pinned_state(ctx.model);
        ctx.model.commit();
        Ok(CommandOutcome::changed(format!("Pinned Record: {target}")))
    }

    pub(super) fn unpin(self, ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
        let view_index = self.index.zero_based();
        let target = ctx
            .model
            .filtered_record(view_index)
            .map(|(_, record)| record.clone())
            .map_err(|_| CommandError::InvalidRecordIndex)?;
        if !ctx.pins.unpin(ctx.model, view_index)? {
            return Err(CommandError::Validation(MESSAGE_NOT_PINNED.to_string()));
        }
        ctx.pins.save_pinned_state(ctx.model);
        ctx.model.commit();
        Ok(CommandOutcome::changed(format!("Unpinned Record: {target}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::test_support::{record, Harness};
    use crate::core::commands::Command;

    fn at(position: usize) -> PinCommand {
        PinCommand::new(Index::from_one_based(position).unwrap())
    }

    #[test]
    fn pin_and_unpin_are_undoable() {
        let mut harness = Harness::with_records(&[record("A", "1", "10/03/2024")]);
        harness.run(Command::Pin(at(1))).unwrap();
        assert!(harness.model.pinned().contains(0));

        harness.run(Command::Undo).unwrap();
        assert!(harness.model.pinned().is_empty());
        harness.run(Command::Redo).unwrap();

        harness.run(Command::Unpin(at(1))).unwrap();
        assert!(harness.model.pinned().is_empty());
    }

    #[test]
    fn pinning_twice_is_rejected_without_commit() {
        let mut harness = Harness::with_records(&[record("A", "1", "10/03/2024")]);
        harness.run(Command::Pin(at(1))).unwrap();
        let history = harness.model.history_len();

        assert_eq!(
            harness.run(Command::Pin(at(1))).unwrap_err(),
            CommandError::Validation(MESSAGE_ALREADY_PINNED.to_string())
        );
        assert_eq!(harness.model.history_len(), history);
        assert!(!harness.pins.has_staged_changes());
    }

    #[test]
    fn index_past_the_list_is_rejected() {
        let mut harness = Harness::with_records(&[record("A", "1", "10/03/2024")]);
        let history = harness.model.history_len();

        for command in [Command::Pin(at(2)), Command::Unpin(at(2))] {
            assert_eq!(
                harness.run(command).unwrap_err(),
                CommandError::InvalidRecordIndex
            );
            assert_eq!(harness.model.history_len(), history);
            assert!(!harness.pins.has_staged_changes());
        }
        assert!(harness.model.pinned().is_empty());
    }

    #[test]
    fn unpinning_an_unpinned_record_is_rejected() {
        let mut harness = Harness::with_records(&[record("A", "1", "10/03/2024")]);
        assert_eq!(
            harness.run(Command::Unpin(at(1))).unwrap_err(),
            CommandError::Validation(MESSAGE_NOT_PINNED.to_string())
        );
    }
}
