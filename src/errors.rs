use std::io;

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::domain::validators::ValidationError;

/// Failures raised by the record stores and the versioned tracker.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FinanceError {
    #[error("duplicate entry: {0}")]
    Duplicate(String),
    #[error("entry not found: {0}")]
    NotFound(String),
    #[error("index {index} is out of range for a list of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no prior state to restore")]
    NoPriorState,
    #[error("no later state to restore")]
    NoLaterState,
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, FinanceError>;

/// Errors produced while reading or writing the data file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Data file is corrupt: {0}")]
    Corrupt(String),
    #[error("data file schema v{found} is newer than supported v{supported}")]
    UnsupportedSchema { found: u8, supported: u8 },
}

impl From<FinanceError> for StorageError {
    fn from(err: FinanceError) -> Self {
        StorageError::Corrupt(err.to_string())
    }
}

/// Errors produced while loading or saving user configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid configuration: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err.to_string())
    }
}

/// Shell-level failures that abort the CLI loop.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
