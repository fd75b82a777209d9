use crate::core::commands::{CommandContext, CommandOutcome};
use crate::core::error::CommandResult;
use crate::domain::Record;
use crate::ledger::Predicate;

pub const MESSAGE_REVERSED: &str = "Order of the list is reversed";

pub(super) fn list(ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
    ctx.model.show_all_records();
    Ok(CommandOutcome::message("Listed all records"))
}

/// Flips the display order. The flag lives in the snapshot, so this commits.
pub(super) fn reverse(ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
    ctx.model.reverse_records();
    ctx.model.show_all_records();
    ctx.model.commit();
    Ok(CommandOutcome::changed(MESSAGE_REVERSED))
}

/// Shows records whose name contains any keyword as a whole word, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    keywords: Vec<String>,
}

impl FindCommand {
    pub fn new(keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.into().to_lowercase())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn predicate(&self) -> Predicate<Record> {
        let keywords = self.keywords.clone();
        Predicate::new(move |record: &Record| {
            record
                .name()
                .as_str()
                .split_whitespace()
                .any(|word| keywords.iter().any(|keyword| word.to_lowercase() == *keyword))
        })
    }

    pub(super) fn execute(self, ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
        ctx.model.update_record_filter(self.predicate());
        let count = ctx.model.filtered_record_count();
        Ok(CommandOutcome::message(format!("{count} records listed!")))
    }
}
