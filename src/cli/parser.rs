//! Turns a command line into a typed [`Command`].

use chrono::NaiveDate;
use shell_words::split;
use strsim::levenshtein;
use thiserror::Error;

use crate::cli::commands::CommandRegistry;
use crate::core::{Command, Index};
use crate::domain::{ValidationError, Validators};

pub const PREFIX_NAME: &str = "n/";
pub const PREFIX_AMOUNT: &str = "$/";
pub const PREFIX_DATE: &str = "d/";
pub const PREFIX_DESCRIPTION: &str = "r/";
pub const PREFIX_CATEGORY: &str = "c/";

const PREFIXES: [&str; 5] = [
    PREFIX_NAME,
    PREFIX_AMOUNT,
    PREFIX_DATE,
    PREFIX_DESCRIPTION,
    PREFIX_CATEGORY,
];

const MAX_SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Could not read command: {0}")]
    Tokenize(String),
    #[error("Unknown command `{input}`. Type `help` to see available commands.")]
    UnknownCommand {
        input: String,
        suggestion: Option<&'static str>,
    },
    #[error("Invalid command format!\nUsage: {usage}")]
    InvalidFormat { usage: &'static str },
    #[error("Index is not a non-zero unsigned integer.")]
    InvalidIndex,
    #[error("At least one field to edit must be provided.")]
    NotEdited,
    #[error("{0}")]
    IllegalArgument(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Values available while a definition builds its command.
pub struct ParseContext<'a> {
    pub validators: &'a Validators,
    pub today: NaiveDate,
    pub usage: &'static str,
}

impl ParseContext<'_> {
    pub fn invalid_format(&self) -> ParseError {
        ParseError::InvalidFormat { usage: self.usage }
    }
}

/// Arguments after the command word, split into a preamble and prefixed values.
///
/// A token that starts with a known prefix opens a new value; tokens without a
/// prefix extend the value before them, so `n/Chicken rice` needs no quoting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArgumentMap {
    preamble: Vec<String>,
    values: Vec<(&'static str, String)>,
}

impl ArgumentMap {
    pub fn tokenize(tokens: &[String]) -> Self {
        let mut map = ArgumentMap::default();
        for token in tokens {
            let prefix = PREFIXES.iter().copied().find(|prefix| token.starts_with(prefix));
            if let Some(prefix) = prefix {
                map.values.push((prefix, token[prefix.len()..].to_string()));
                continue;
            }
            match map.values.last_mut() {
                Some((_, value)) => {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(token);
                }
                None => map.preamble.push(token.clone()),
            }
        }
        map
    }

    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }

    pub fn has(&self, prefix: &str) -> bool {
        self.values.iter().any(|(key, _)| *key == prefix)
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(key, _)| *key == prefix)
            .map(|(_, value)| value.as_str())
    }

    pub fn all(&self, prefix: &str) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(key, _)| *key == prefix)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// True when every prefix used is one of `allowed`.
    pub fn only_uses(&self, allowed: &[&str]) -> bool {
        self.values.iter().all(|(key, _)| allowed.contains(key))
    }
}

pub fn parse_index(raw: &str) -> Result<Index, ParseError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
        .ok_or(ParseError::InvalidIndex)
}

/// Reads the single index argument of commands such as `delete 2`.
pub fn single_index(args: &ArgumentMap, ctx: &ParseContext<'_>) -> Result<Index, ParseError> {
    match (args.preamble(), args.only_uses(&[])) {
        ([raw], true) => parse_index(raw),
        _ => Err(ctx.invalid_format()),
    }
}

pub fn split_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError::Tokenize(err.to_string()))
}

pub struct CommandParser {
    registry: CommandRegistry,
    validators: Validators,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(CommandRegistry::default(), Validators::default())
    }
}

impl CommandParser {
    pub fn new(registry: CommandRegistry, validators: Validators) -> Self {
        Self {
            registry,
            validators,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn parse(&self, line: &str, today: NaiveDate) -> Result<Command, ParseError> {
        let tokens = split_line(line)?;
        let Some(first) = tokens.first() else {
            return Err(ParseError::UnknownCommand {
                input: String::new(),
                suggestion: None,
            });
        };

        let two_words = tokens
            .get(1)
            .map(|second| format!("{} {}", first.to_lowercase(), second.to_lowercase()));
        let (definition, rest) = match two_words.as_deref().and_then(|key| self.registry.get(key)) {
            Some(definition) => (definition, &tokens[2..]),
            None => match self.registry.get(&first.to_lowercase()) {
                Some(definition) => (definition, &tokens[1..]),
                None => {
                    return Err(ParseError::UnknownCommand {
                        input: first.clone(),
                        suggestion: self.suggest(first),
                    })
                }
            },
        };

        let ctx = ParseContext {
            validators: &self.validators,
            today,
            usage: definition.usage,
        };
        (definition.parse)(&ArgumentMap::tokenize(rest), &ctx)
    }

    fn suggest(&self, input: &str) -> Option<&'static str> {
        let input = input.to_lowercase();
        self.registry
            .words()
            .map(|word| (levenshtein(word, &input), word))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .map(|(_, word)| word)
    }
}
