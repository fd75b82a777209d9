use crate::core::commands::{CommandContext, CommandOutcome};
use crate::core::error::{CommandError, CommandResult};
use crate::errors::FinanceError;

pub(super) fn undo(ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
    ctx.model.undo().map_err(|err| match err {
        FinanceError::NoPriorState => CommandError::NothingToUndo,
        other => CommandError::Internal(other),
    })?;
    Ok(CommandOutcome::changed("Undo success!"))
}

pub(super) fn redo(ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
    ctx.model.redo().map_err(|err| match err {
        FinanceError::NoLaterState => CommandError::NothingToRedo,
        other => CommandError::Internal(other),
    })?;
    Ok(CommandOutcome::changed("Redo success!"))
}

#[cfg(test)]
mod tests {
    use crate::core::commands::test_support::{record, Harness};
    use crate::core::commands::{AddCommand, Command};
    use crate::core::error::CommandError;

    #[test]
    fn undo_all_then_redo_all_round_trips() {
        let records = [
            record("A", "1", "10/03/2024"),
            record("B", "2", "11/03/2024"),
            record("C", "3", "12/03/2024"),
        ];
        let mut harness = Harness::with_records(&records);
        let last = harness.model.state().clone();

        for _ in 0..records.len() {
            harness.run(Command::Undo).unwrap();
        }
        assert!(harness.model.records().is_empty());
        assert_eq!(
            harness.run(Command::Undo).unwrap_err(),
            CommandError::NothingToUndo
        );

        for _ in 0..records.len() {
            harness.run(Command::Redo).unwrap();
        }
        assert_eq!(harness.model.state(), &last);
        assert_eq!(
            harness.run(Command::Redo).unwrap_err(),
            CommandError::NothingToRedo
        );
    }

    #[test]
    fn new_command_after_undo_discards_redo() {
        let mut harness = Harness::with_records(&[record("A", "1", "10/03/2024")]);
        harness.run(Command::Undo).unwrap();
        harness
            .run(Command::Add(AddCommand::new(record("B", "2", "10/03/2024"))))
            .unwrap();
        assert_eq!(
            harness.run(Command::Redo).unwrap_err(),
            CommandError::NothingToRedo
        );
    }
}
