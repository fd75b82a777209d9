use std::collections::HashMap;

pub mod listing;
pub mod record;
pub mod source;
pub mod system;

use crate::cli::parser::{ArgumentMap, ParseContext, ParseError};
use crate::core::Command;

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(record::definitions());
    commands.extend(listing::definitions());
    commands.extend(source::definitions());
    commands.extend(system::definitions());
    commands
}

pub type CommandParseFn = fn(&ArgumentMap, &ParseContext<'_>) -> Result<Command, ParseError>;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub parse: CommandParseFn,
}

impl CommandDefinition {
    pub fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        description: &'static str,
        usage: &'static str,
        parse: CommandParseFn,
    ) -> Self {
        Self {
            name,
            aliases,
            description,
            usage,
            parse,
        }
    }
}

/// Command definitions keyed by name and alias, kept in registration order.
pub struct CommandRegistry {
    commands: Vec<CommandDefinition>,
    lookup: HashMap<&'static str, usize>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(all_definitions())
    }
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut lookup = HashMap::new();
        for (position, definition) in definitions.iter().enumerate() {
            lookup.insert(definition.name, position);
            for alias in definition.aliases {
                lookup.insert(*alias, position);
            }
        }
        Self {
            commands: definitions,
            lookup,
        }
    }

    /// Looks up a lowercase command word or alias.
    pub fn get(&self, word: &str) -> Option<&CommandDefinition> {
        self.lookup
            .get(word)
            .and_then(|position| self.commands.get(*position))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.commands.iter()
    }

    /// Every name and alias, for completion and suggestions.
    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().flat_map(|definition| {
            std::iter::once(definition.name).chain(definition.aliases.iter().copied())
        })
    }
}
