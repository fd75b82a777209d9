use crate::core::commands::{CommandContext, CommandOutcome};
use crate::core::error::{CommandError, CommandResult};
use crate::domain::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommand {
    record: Record,
}

impl AddCommand {
    pub fn new(record: Record) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub(super) fn execute(self, ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
        if ctx.model.has_record(&self.record) {
            return Err(CommandError::DuplicateRecord);
        }
        let message = format!("New record added: {}", self.record);
        ctx.model.add_record(self.record)?;
        ctx.model.show_all_records();
        ctx.model.commit();
        Ok(CommandOutcome::changed(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::test_support::{record, Harness};
    use crate::core::commands::Command;

    #[test]
    fn add_commits_one_snapshot() {
        let mut harness = Harness::new();
        let outcome = harness
            .run(Command::Add(AddCommand::new(record("Lunch", "5", "14/03/2024"))))
            .unwrap();
        assert!(outcome.state_changed);
        assert!(outcome.message.contains("Lunch"));
        assert_eq!(harness.model.history_len(), 2);
    }

    #[test]
    fn duplicate_add_leaves_tracker_untouched() {
        let mut harness = Harness::with_records(&[record("Lunch", "5", "14/03/2024")]);
        let before = harness.model.state().clone();

        let err = harness
            .run(Command::Add(AddCommand::new(record("Lunch", "5.00", "14/03/2024"))))
            .unwrap_err();
        assert_eq!(err, CommandError::DuplicateRecord);
        assert_eq!(harness.model.state(), &before);
        assert_eq!(harness.model.history_len(), 2);
    }
}
