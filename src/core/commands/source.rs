use tracing::debug;

use crate::core::commands::{CommandContext, CommandOutcome};
use crate::core::error::{CommandError, CommandResult};
use crate::core::index::Index;
use crate::domain::Source;

const DELETED_SOURCE_HEADER: &str = "Deleted Source:\n-----------------------------------";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSourceCommand {
    source: Source,
}

impl AddSourceCommand {
    pub fn new(source: Source) -> Self {
        Self { source }
    }

    pub(super) fn execute(self, ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
        if ctx.model.has_source(&self.source) {
            return Err(CommandError::DuplicateSource);
        }
        let message = format!("New source added: {}", self.source);
        ctx.model.add_source(self.source)?;
        ctx.model.commit();
        Ok(CommandOutcome::changed(message))
    }
}

pub(super) fn list(ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
    ctx.model.show_all_sources();
    Ok(CommandOutcome::message("Listed all sources"))
}

/// Source counterpart of record deletion; sources carry no pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteSourceCommand {
    index: Index,
}

impl DeleteSourceCommand {
    pub fn new(index: Index) -> Self {
        Self { index }
    }

    pub(super) fn execute(self, ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
        let target = ctx
            .model
            .filtered_source(self.index.zero_based())
            .map(|(_, source)| source.clone())
            .map_err(|_| CommandError::InvalidSourceIndex)?;

        if ctx.model.has_deleted_source(&target) {
            ctx.model.delete_source(&target)?;
            ctx.model.remove_deleted_source(&target)?;
            ctx.model.erase_source_from_history(&target);
            debug!(source = %target, "source permanently deleted");
        } else {
            ctx.model.move_source_to_deleted(&target)?;
        }
        ctx.model.commit();
        Ok(CommandOutcome::changed(format!(
            "{DELETED_SOURCE_HEADER}\n{target}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::core::commands::test_support::Harness;
    use crate::core::commands::Command;
    use crate::domain::{Description, Name};

    fn source(name: &str, description: &str) -> Source {
        Source::new(
            Name::parse(name).unwrap(),
            Description::new(description),
            BTreeSet::new(),
        )
    }

    fn delete_first() -> Command {
        Command::DeleteSource(DeleteSourceCommand::new(Index::from_zero_based(0)))
    }

    #[test]
    fn sources_are_unique_by_name() {
        let mut harness = Harness::new();
        harness
            .run(Command::AddSource(AddSourceCommand::new(source("Salary", "monthly"))))
            .unwrap();
        assert_eq!(
            harness
                .run(Command::AddSource(AddSourceCommand::new(source("Salary", "bonus"))))
                .unwrap_err(),
            CommandError::DuplicateSource
        );
    }

    #[test]
    fn deleting_a_source_twice_erases_it() {
        let salary = source("Salary", "monthly");
        let mut harness = Harness::new();
        harness
            .run(Command::AddSource(AddSourceCommand::new(salary.clone())))
            .unwrap();

        let outcome = harness.run(delete_first()).unwrap();
        assert!(outcome.message.starts_with("Deleted Source:\n---"));
        assert!(harness.model.has_deleted_source(&salary));

        harness
            .run(Command::AddSource(AddSourceCommand::new(salary.clone())))
            .unwrap();
        harness.run(delete_first()).unwrap();
        assert!(harness.model.sources().is_empty());
        assert!(!harness.model.has_deleted_source(&salary));
    }

    #[test]
    fn invalid_source_index_is_rejected() {
        let mut harness = Harness::new();
        assert_eq!(
            harness.run(delete_first()).unwrap_err(),
            CommandError::InvalidSourceIndex
        );
    }
}
