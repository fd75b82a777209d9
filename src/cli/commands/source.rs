use crate::cli::parser::{
    single_index, ArgumentMap, ParseContext, ParseError, PREFIX_CATEGORY, PREFIX_DESCRIPTION,
    PREFIX_NAME,
};
use crate::core::commands::{AddSourceCommand, DeleteSourceCommand};
use crate::core::Command;
use crate::domain::{Description, Source};

use super::listing::no_arguments;
use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "source add",
            &[],
            "Record a new source of income",
            "source add n/NAME [r/DESCRIPTION] [c/CATEGORY]...",
            parse_add_source,
        ),
        CommandDefinition::new(
            "source delete",
            &["source d"],
            "Delete the source at INDEX; deleting it again erases it for good",
            "source delete INDEX",
            |args, ctx| {
                single_index(args, ctx)
                    .map(|index| Command::DeleteSource(DeleteSourceCommand::new(index)))
            },
        ),
        CommandDefinition::new(
            "source list",
            &["source ls"],
            "List every source",
            "source list",
            |args, ctx| no_arguments(args, ctx).map(|_| Command::ListSources),
        ),
    ]
}

fn parse_add_source(args: &ArgumentMap, ctx: &ParseContext<'_>) -> Result<Command, ParseError> {
    if !args.preamble().is_empty()
        || !args.only_uses(&[PREFIX_NAME, PREFIX_DESCRIPTION, PREFIX_CATEGORY])
    {
        return Err(ctx.invalid_format());
    }
    let Some(name) = args.value(PREFIX_NAME) else {
        return Err(ctx.invalid_format());
    };
    let validators = ctx.validators;
    let description = match args.value(PREFIX_DESCRIPTION) {
        Some(raw) => validators.description(raw)?,
        None => Description::default(),
    };
    let source = Source::new(
        validators.name(name)?,
        description,
        validators.categories(args.all(PREFIX_CATEGORY))?,
    );
    Ok(Command::AddSource(AddSourceCommand::new(source)))
}
