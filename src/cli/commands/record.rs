use crate::cli::parser::{
    parse_index, single_index, ArgumentMap, ParseContext, ParseError, PREFIX_AMOUNT,
    PREFIX_CATEGORY, PREFIX_DATE, PREFIX_DESCRIPTION, PREFIX_NAME,
};
use crate::core::commands::{
    AddCommand, DeleteCommand, EditCommand, EditRecordDescriptor, FindCommand, PinCommand,
};
use crate::core::Command;
use crate::domain::{Description, Record, RecordDate};

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "spend",
            &["add"],
            "Record a new spending",
            "spend n/NAME $/AMOUNT [d/DATE] [r/DESCRIPTION] [c/CATEGORY]...",
            parse_spend,
        ),
        CommandDefinition::new(
            "delete",
            &["d"],
            "Delete the record at INDEX; deleting it again erases it for good",
            "delete INDEX",
            parse_delete,
        ),
        CommandDefinition::new(
            "edit",
            &["e"],
            "Edit the record at INDEX",
            "edit INDEX [n/NAME] [$/AMOUNT] [d/DATE] [c/CATEGORY]...",
            parse_edit,
        ),
        CommandDefinition::new(
            "find",
            &[],
            "List records whose name contains any of the keywords",
            "find KEYWORD [MORE_KEYWORDS]...",
            parse_find,
        ),
        CommandDefinition::new(
            "pin",
            &[],
            "Pin the record at INDEX",
            "pin INDEX",
            |args, ctx| single_index(args, ctx).map(|index| Command::Pin(PinCommand::new(index))),
        ),
        CommandDefinition::new(
            "unpin",
            &[],
            "Unpin the record at INDEX",
            "unpin INDEX",
            |args, ctx| {
                single_index(args, ctx).map(|index| Command::Unpin(PinCommand::new(index)))
            },
        ),
    ]
}

fn parse_spend(args: &ArgumentMap, ctx: &ParseContext<'_>) -> Result<Command, ParseError> {
    let allowed = [
        PREFIX_NAME,
        PREFIX_AMOUNT,
        PREFIX_DATE,
        PREFIX_DESCRIPTION,
        PREFIX_CATEGORY,
    ];
    if !args.preamble().is_empty() || !args.only_uses(&allowed) {
        return Err(ctx.invalid_format());
    }
    let (Some(name), Some(amount)) = (args.value(PREFIX_NAME), args.value(PREFIX_AMOUNT)) else {
        return Err(ctx.invalid_format());
    };

    let validators = ctx.validators;
    let date = match args.value(PREFIX_DATE) {
        Some(raw) => validators.date(raw)?,
        None => RecordDate::new(ctx.today),
    };
    let description = match args.value(PREFIX_DESCRIPTION) {
        Some(raw) => validators.description(raw)?,
        None => Description::default(),
    };
    let record = Record::new(
        validators.name(name)?,
        validators.amount(amount)?,
        date,
        description,
        validators.categories(args.all(PREFIX_CATEGORY))?,
    );
    Ok(Command::Add(AddCommand::new(record)))
}

fn parse_delete(args: &ArgumentMap, ctx: &ParseContext<'_>) -> Result<Command, ParseError> {
    single_index(args, ctx).map(|index| Command::Delete(DeleteCommand::new(index)))
}

fn parse_edit(args: &ArgumentMap, ctx: &ParseContext<'_>) -> Result<Command, ParseError> {
    let allowed = [PREFIX_NAME, PREFIX_AMOUNT, PREFIX_DATE, PREFIX_CATEGORY];
    let [raw_index] = args.preamble() else {
        return Err(ctx.invalid_format());
    };
    if !args.only_uses(&allowed) {
        return Err(ctx.invalid_format());
    }
    let index = parse_index(raw_index)?;

    let validators = ctx.validators;
    let mut descriptor = EditRecordDescriptor {
        name: args.value(PREFIX_NAME).map(|raw| validators.name(raw)).transpose()?,
        amount: args
            .value(PREFIX_AMOUNT)
            .map(|raw| validators.amount(raw))
            .transpose()?,
        date: args.value(PREFIX_DATE).map(|raw| validators.date(raw)).transpose()?,
        categories: None,
    };
    if args.has(PREFIX_CATEGORY) {
        // A lone empty `c/` clears every category.
        let raw: Vec<&str> = args
            .all(PREFIX_CATEGORY)
            .into_iter()
            .filter(|value| !value.trim().is_empty())
            .collect();
        descriptor.categories = Some(validators.categories(raw)?);
    }

    if !descriptor.is_any_field_edited() {
        return Err(ParseError::NotEdited);
    }
    Ok(Command::Edit(EditCommand::new(index, descriptor)))
}

fn parse_find(args: &ArgumentMap, ctx: &ParseContext<'_>) -> Result<Command, ParseError> {
    if args.preamble().is_empty() || !args.only_uses(&[]) {
        return Err(ctx.invalid_format());
    }
    Ok(Command::Find(FindCommand::new(args.preamble().iter().cloned())))
}
