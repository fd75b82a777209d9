use std::collections::BTreeSet;

use crate::core::commands::{CommandContext, CommandOutcome};
use crate::core::error::{CommandError, CommandResult};
use crate::core::index::Index;
use crate::domain::{Amount, Category, Name, Record, RecordDate};

pub const MESSAGE_NOT_EDITED: &str = "At least one field to edit must be provided.";

/// Fields to overlay onto an existing record. Unset fields keep their value;
/// the description is never touched by an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditRecordDescriptor {
    pub name: Option<Name>,
    pub amount: Option<Amount>,
    pub date: Option<RecordDate>,
    pub categories: Option<BTreeSet<Category>>,
}

impl EditRecordDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.amount.is_some()
            || self.date.is_some()
            || self.categories.is_some()
    }

    pub fn apply(&self, original: &Record) -> Record {
        Record::new(
            self.name.clone().unwrap_or_else(|| original.name().clone()),
            self.amount.unwrap_or_else(|| original.amount()),
            self.date.unwrap_or_else(|| original.date()),
            original.description().clone(),
            self.categories
                .clone()
                .unwrap_or_else(|| original.categories().clone()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    index: Index,
    descriptor: EditRecordDescriptor,
}

impl EditCommand {
    pub fn new(index: Index, descriptor: EditRecordDescriptor) -> Self {
        Self { index, descriptor }
    }

    pub fn descriptor(&self) -> &EditRecordDescriptor {
        &self.descriptor
    }

    pub(super) fn execute(self, ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
        if !self.descriptor.is_any_field_edited() {
            return Err(CommandError::Validation(MESSAGE_NOT_EDITED.to_string()));
        }
        let target = ctx
            .model
            .filtered_record(self.index.zero_based())
            .map(|(_, record)| record.clone())
            .map_err(|_| CommandError::InvalidRecordIndex)?;
        let edited = self.descriptor.apply(&target);

        if !target.is_same_record(&edited) && ctx.model.has_record(&edited) {
            return Err(CommandError::DuplicateRecord);
        }

        let message = format!("Edited Record: {edited}");
        ctx.model.set_record(&target, edited)?;
        ctx.model.show_all_records();
        ctx.model.commit();
        Ok(CommandOutcome::changed(message))
    }
}
