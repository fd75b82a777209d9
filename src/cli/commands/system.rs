use crate::core::Command;

use super::listing::no_arguments;
use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "undo",
            &["u"],
            "Undo the last change",
            "undo",
            |args, ctx| no_arguments(args, ctx).map(|_| Command::Undo),
        ),
        CommandDefinition::new(
            "redo",
            &["r"],
            "Redo the last undone change",
            "redo",
            |args, ctx| no_arguments(args, ctx).map(|_| Command::Redo),
        ),
        CommandDefinition::new(
            "help",
            &["h"],
            "Show the available commands",
            "help",
            |_, _| Ok(Command::Help),
        ),
        CommandDefinition::new(
            "exit",
            &["quit", "q"],
            "Save and leave the finance tracker",
            "exit",
            |_, _| Ok(Command::Exit),
        ),
    ]
}
