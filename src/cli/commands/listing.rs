use crate::cli::parser::{ArgumentMap, ParseContext, ParseError};
use crate::core::commands::summary::{DEFAULT_UNIT, DEFAULT_WINDOW};
use crate::core::commands::SummaryCommand;
use crate::core::Command;
use crate::errors::FinanceError;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "list",
            &["ls"],
            "List every record",
            "list",
            |args, ctx| no_arguments(args, ctx).map(|_| Command::List),
        ),
        CommandDefinition::new(
            "list reverse",
            &["list rev", "ls reverse", "ls rev"],
            "Reverse the order records are listed in",
            "list reverse",
            |args, ctx| no_arguments(args, ctx).map(|_| Command::Reverse),
        ),
        CommandDefinition::new(
            "summary",
            &[],
            "Summarise spending over the last WINDOW days (d) or months (m)",
            "summary [WINDOW] [d|m]",
            parse_summary,
        ),
    ]
}

pub(crate) fn no_arguments(args: &ArgumentMap, ctx: &ParseContext<'_>) -> Result<(), ParseError> {
    if args.preamble().is_empty() && args.only_uses(&[]) {
        Ok(())
    } else {
        Err(ctx.invalid_format())
    }
}

fn parse_summary(args: &ArgumentMap, ctx: &ParseContext<'_>) -> Result<Command, ParseError> {
    if !args.only_uses(&[]) {
        return Err(ctx.invalid_format());
    }
    let (raw_window, unit) = match args.preamble() {
        [] => return Ok(Command::Summary(SummaryCommand::default())),
        [window] => (window.as_str(), DEFAULT_UNIT),
        [window, unit] => (window.as_str(), unit.as_str()),
        _ => return Err(ctx.invalid_format()),
    };
    let window = raw_window.parse::<i64>().map_err(|_| {
        ParseError::IllegalArgument(format!(
            "Summary window must be a whole number such as {DEFAULT_WINDOW}, got `{raw_window}`"
        ))
    })?;
    SummaryCommand::new(window, &unit.to_lowercase())
        .map(Command::Summary)
        .map_err(|err| match err {
            FinanceError::IllegalArgument(message) => ParseError::IllegalArgument(message),
            other => ParseError::IllegalArgument(other.to_string()),
        })
}
